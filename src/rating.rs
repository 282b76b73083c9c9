//! Star Rating State
//!
//! A 1-5 value with hover preview. Zero means "unset" and is only
//! accepted until the user (or a form opening) has picked a value.

pub const MAX_RATING: u8 = 5;
/// Value a fresh create form starts with
pub const DEFAULT_RATING: u8 = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingState {
    committed: u8,
    preview: Option<u8>,
    touched: bool,
}

impl RatingState {
    pub fn value(&self) -> u8 {
        self.committed
    }

    /// What the stars should show right now (hover wins over the value)
    pub fn displayed(&self) -> u8 {
        self.preview.unwrap_or(self.committed)
    }

    /// Set the committed value. Returns false when the value is rejected:
    /// out of range, or zero after a value has been picked.
    pub fn set_value(&mut self, value: u8) -> bool {
        if value > MAX_RATING || (value == 0 && self.touched) {
            return false;
        }
        self.committed = value;
        self.preview = None;
        self.touched |= value != 0;
        true
    }

    /// Initialise for a form: the stored rating when editing, otherwise
    /// the create default.
    pub fn reset_for_form(&mut self, existing: Option<u8>) {
        let value = existing.filter(|v| (1..=MAX_RATING).contains(v)).unwrap_or(DEFAULT_RATING);
        *self = RatingState::default();
        self.set_value(value);
    }

    pub fn click(&mut self, star: u8) {
        self.set_value(star.clamp(1, MAX_RATING));
    }

    pub fn hover(&mut self, star: u8) {
        self.preview = Some(star.clamp(1, MAX_RATING));
    }

    pub fn leave(&mut self) {
        self.preview = None;
    }

    /// Star `n` (1-based) is drawn filled
    pub fn is_filled(&self, star: u8) -> bool {
        star <= self.displayed()
    }

    pub fn description(&self) -> Option<String> {
        describe(self.displayed())
    }
}

pub fn describe(value: u8) -> Option<String> {
    let label = match value {
        1 => "Very poor",
        2 => "Poor",
        3 => "Fair",
        4 => "Good",
        5 => "Excellent",
        _ => return None,
    };
    let stars = if value == 1 { "star" } else { "stars" };
    Some(format!("{} - {} {}", label, value, stars))
}
