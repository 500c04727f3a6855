//! Volume state for the panel
//!
//! Separates three values:
//! - `local`: what the element plays right now (follows every preview)
//! - `confirmed`: the last value the session acknowledged
//! - `pending`: a commit held back while another commit is in flight
//!
//! Only commits reach the server, so a drag gesture costs at most one
//! request plus one held follow-up, whatever its granularity.

/// Volume controller with preview/commit split
#[derive(Debug, Clone)]
pub struct VolumeControl {
    /// Level the element is playing at (0-100)
    local: u8,

    /// Level last acknowledged by the session (0-100)
    confirmed: u8,

    /// Latest commit waiting for the in-flight one to settle
    pending: Option<u8>,
}

impl VolumeControl {
    /// Create a controller at a confirmed level
    pub fn new(level: u8) -> Self {
        let level = level.min(100);
        Self {
            local: level,
            confirmed: level,
            pending: None,
        }
    }

    /// Level the element is playing at
    pub fn level(&self) -> u8 {
        self.local
    }

    /// Last level the session acknowledged
    pub fn confirmed(&self) -> u8 {
        self.confirmed
    }

    /// Apply a drag preview locally, returns the clamped level
    pub fn preview(&mut self, level: u8) -> u8 {
        self.local = level.min(100);
        self.local
    }

    /// Hold a commit until the in-flight one settles. Later holds replace
    /// earlier ones.
    pub fn hold(&mut self, level: u8) -> u8 {
        let level = self.preview(level);
        self.pending = Some(level);
        level
    }

    /// Take the held commit, if any
    pub fn take_pending(&mut self) -> Option<u8> {
        self.pending.take()
    }

    /// Adopt a server-acknowledged level
    ///
    /// The local level only follows when no newer preview is on screen.
    pub fn confirm(&mut self, level: u8) {
        let level = level.min(100);
        if self.pending.is_none() {
            self.local = level;
        }
        self.confirmed = level;
    }

    /// Drop the local value and go back to the confirmed one
    pub fn revert(&mut self) -> u8 {
        self.local = self.confirmed;
        self.local
    }
}

impl Default for VolumeControl {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Convert volume percentage to linear gain
///
/// Formula: gain = 10^((level% - 100) * 0.6 / 20)
/// - 0%   → silence
/// - 50%  → -30 dB → 0.0316 gain
/// - 100% →   0 dB → 1.0 gain (unity)
pub fn gain_for(level: u8) -> f32 {
    let level = level.min(100);
    if level == 0 {
        return 0.0;
    }

    // Map 0-100% to -60 dB to 0 dB
    let db = (f32::from(level) - 100.0) * 0.6;
    10.0_f32.powf(db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_local_only() {
        let mut vol = VolumeControl::new(80);
        vol.preview(30);
        assert_eq!(vol.level(), 30);
        assert_eq!(vol.confirmed(), 80);

        // Clamp to 100
        assert_eq!(vol.preview(150), 100);
    }

    #[test]
    fn latest_hold_wins() {
        let mut vol = VolumeControl::new(50);
        vol.hold(40);
        vol.hold(20);
        assert_eq!(vol.take_pending(), Some(20));
        assert_eq!(vol.take_pending(), None);
    }

    #[test]
    fn confirm_keeps_newer_preview_on_screen() {
        let mut vol = VolumeControl::new(50);
        vol.hold(10);
        vol.confirm(40);
        assert_eq!(vol.confirmed(), 40);
        assert_eq!(vol.level(), 10);
    }

    #[test]
    fn revert_restores_confirmed() {
        let mut vol = VolumeControl::new(70);
        vol.preview(5);
        assert_eq!(vol.revert(), 70);
        assert_eq!(vol.level(), 70);
    }

    #[test]
    fn gain_calculation() {
        assert_eq!(gain_for(0), 0.0);
        assert!((gain_for(100) - 1.0).abs() < 0.001);
        assert!((gain_for(50) - 0.0316).abs() < 0.001);
        assert!((gain_for(80) - 0.251).abs() < 0.01);
    }
}
