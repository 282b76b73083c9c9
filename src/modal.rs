//! Modal Controller
//!
//! Dialog lifecycle as an explicit state machine:
//! `Closed -> Opening -> Open -> Closing -> Closed`.
//!
//! Every transition bumps an epoch. Deferred work (the entrance on the next
//! paint, the teardown after the settle delay, content arriving from the
//! network) carries the epoch it was issued under and is dropped if the
//! dialog has moved on since. Content is only ever cleared by a completed
//! close, and every open installs fresh content, so a close can never
//! leave stale content behind.

use std::rc::Rc;

use leptos::prelude::*;

use crate::models::{ItemId, ResourceItem};
use crate::schedule::Scheduler;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalPhase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    View,
    Create,
    Edit,
    ConfirmDelete,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalContent {
    #[default]
    Empty,
    /// Placeholder while detail is being fetched
    Loading,
    Detail(ResourceItem),
    /// The panel's form (create or edit), rendered from its form state
    Form,
    ConfirmDelete { id: ItemId, title: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalState {
    pub phase: ModalPhase,
    pub mode: Option<ModalMode>,
    /// Item the content belongs to, if any
    pub owner: Option<ItemId>,
    pub content: ModalContent,
    epoch: u64,
}

impl ModalState {
    /// Open or opening; the states in which close does something
    pub fn is_open(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Open)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn open(&mut self, mode: ModalMode, owner: Option<ItemId>, content: ModalContent) -> u64 {
        self.epoch += 1;
        self.phase = ModalPhase::Opening;
        self.mode = Some(mode);
        self.owner = owner;
        self.content = content;
        self.epoch
    }

    /// Entrance transition, applied on the paint after `open`
    pub fn settle_open(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || self.phase != ModalPhase::Opening {
            return false;
        }
        self.phase = ModalPhase::Open;
        true
    }

    /// Start the exit transition. None when there is nothing to close.
    pub fn begin_close(&mut self) -> Option<u64> {
        if !self.is_open() {
            return None;
        }
        self.epoch += 1;
        self.phase = ModalPhase::Closing;
        Some(self.epoch)
    }

    /// Hide and tear down once the exit transition has run
    pub fn finish_close(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch || self.phase != ModalPhase::Closing {
            return false;
        }
        self.phase = ModalPhase::Closed;
        self.mode = None;
        self.owner = None;
        self.content = ModalContent::Empty;
        true
    }

    /// Install content for the opening issued under `epoch`
    pub fn set_content(&mut self, epoch: u64, content: ModalContent) -> bool {
        if epoch != self.epoch || !self.is_open() {
            return false;
        }
        self.content = content;
        true
    }

    pub fn class(&self) -> &'static str {
        match self.phase {
            ModalPhase::Closed => "modal hidden",
            ModalPhase::Opening => "modal",
            ModalPhase::Open => "modal open",
            ModalPhase::Closing => "modal closing",
        }
    }
}

/// Reactive handle over one dialog
#[derive(Clone, Copy)]
pub struct ModalController {
    state: RwSignal<ModalState>,
    scheduler: StoredValue<Rc<dyn Scheduler>, LocalStorage>,
    settle_ms: u32,
}

impl ModalController {
    pub fn new(scheduler: Rc<dyn Scheduler>, settle_ms: u32) -> Self {
        Self {
            state: RwSignal::new(ModalState::default()),
            scheduler: StoredValue::new_local(scheduler),
            settle_ms,
        }
    }

    pub fn state(&self) -> RwSignal<ModalState> {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.try_with_untracked(ModalState::is_open).unwrap_or(false)
    }

    /// The opening issued under `epoch` is still the one on screen
    pub fn is_current(&self, epoch: u64) -> bool {
        self.state
            .try_with_untracked(|m| m.is_open() && m.epoch() == epoch)
            .unwrap_or(false)
    }

    /// Show the dialog now; the entrance transition follows on the next
    /// paint. Returns the epoch content updates must quote.
    pub fn open(&self, mode: ModalMode, owner: Option<ItemId>, content: ModalContent) -> u64 {
        let Some(epoch) = self.state.try_update(|m| m.open(mode, owner, content)) else {
            return 0;
        };
        log::debug!("[MODAL] open {:?} (epoch {})", mode, epoch);

        let state = self.state;
        self.scheduler.with_value(|s| {
            s.next_frame(Box::new(move || {
                state.update(|m| {
                    m.settle_open(epoch);
                });
            }))
        });
        epoch
    }

    /// Start closing; teardown runs after the settle delay. Closing a
    /// dialog that is not open does nothing and returns false.
    pub fn close(&self) -> bool {
        let Some(epoch) = self.state.try_update(|m| m.begin_close()).flatten() else {
            return false;
        };
        log::debug!("[MODAL] close (epoch {})", epoch);

        let state = self.state;
        self.scheduler.with_value(|s| {
            s.after(
                self.settle_ms,
                Box::new(move || {
                    state.update(|m| {
                        m.finish_close(epoch);
                    });
                }),
            )
        });
        true
    }

    pub fn set_content(&self, epoch: u64, content: ModalContent) -> bool {
        let applied = self.state.try_update(|m| m.set_content(epoch, content)).unwrap_or(false);
        if !applied {
            log::debug!("[MODAL] dropped content for stale epoch {}", epoch);
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResourceKind;
    use crate::schedule::manual::ManualScheduler;

    fn controller() -> (ModalController, Rc<ManualScheduler>) {
        let sched = Rc::new(ManualScheduler::default());
        (ModalController::new(sched.clone(), 300), sched)
    }

    fn phase(modal: &ModalController) -> ModalPhase {
        modal.state().get_untracked().phase
    }

    #[test]
    fn open_settles_on_next_frame() {
        let (modal, sched) = controller();
        modal.open(ModalMode::View, Some(ItemId::new("1")), ModalContent::Loading);
        assert_eq!(phase(&modal), ModalPhase::Opening);

        sched.run_frames();
        assert_eq!(phase(&modal), ModalPhase::Open);
    }

    #[test]
    fn close_clears_content_after_settle_delay() {
        let (modal, sched) = controller();
        modal.open(ModalMode::Create, None, ModalContent::Form);
        sched.run_frames();

        assert!(modal.close());
        let state = modal.state().get_untracked();
        assert_eq!(state.phase, ModalPhase::Closing);
        assert_eq!(state.content, ModalContent::Form);

        sched.advance(300);
        let state = modal.state().get_untracked();
        assert_eq!(state.phase, ModalPhase::Closed);
        assert_eq!(state.content, ModalContent::Empty);
        assert_eq!(state.mode, None);
    }

    #[test]
    fn closing_a_closed_modal_is_a_noop() {
        let (modal, sched) = controller();
        assert!(!modal.close());
        assert_eq!(sched.pending_timers(), 0);
    }

    #[test]
    fn second_close_while_closing_is_a_noop() {
        let (modal, sched) = controller();
        modal.open(ModalMode::Create, None, ModalContent::Form);
        assert!(modal.close());
        assert!(!modal.close());
        assert_eq!(sched.pending_timers(), 1);
    }

    #[test]
    fn reopen_during_close_keeps_new_content() {
        let (modal, sched) = controller();
        modal.open(ModalMode::View, Some(ItemId::new("1")), ModalContent::Loading);
        modal.close();
        modal.open(ModalMode::Create, None, ModalContent::Form);

        // The first close's teardown fires but belongs to an old epoch
        sched.advance(300);
        sched.run_frames();

        let state = modal.state().get_untracked();
        assert_eq!(state.phase, ModalPhase::Open);
        assert_eq!(state.content, ModalContent::Form);
        assert_eq!(state.mode, Some(ModalMode::Create));
    }

    #[test]
    fn close_before_entrance_still_tears_down() {
        let (modal, sched) = controller();
        modal.open(ModalMode::View, None, ModalContent::Loading);
        modal.close();
        sched.run_frames();
        sched.advance(300);

        let state = modal.state().get_untracked();
        assert_eq!(state.phase, ModalPhase::Closed);
        assert_eq!(state.content, ModalContent::Empty);
    }

    #[test]
    fn late_content_after_close_is_dropped() {
        let (modal, sched) = controller();
        let epoch = modal.open(ModalMode::View, Some(ItemId::new("4")), ModalContent::Loading);
        modal.close();
        sched.advance(300);

        let item = ResourceItem::new(ResourceKind::Review, ItemId::new("4"), "GOR");
        assert!(!modal.set_content(epoch, ModalContent::Detail(item)));
        assert_eq!(modal.state().get_untracked().content, ModalContent::Empty);
    }

    #[test]
    fn content_for_current_epoch_is_applied() {
        let (modal, _sched) = controller();
        let epoch = modal.open(ModalMode::View, Some(ItemId::new("4")), ModalContent::Loading);
        let item = ResourceItem::new(ResourceKind::Review, ItemId::new("4"), "GOR");
        assert!(modal.set_content(epoch, ModalContent::Detail(item.clone())));
        assert_eq!(modal.state().get_untracked().content, ModalContent::Detail(item));
    }
}
