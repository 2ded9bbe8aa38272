//! Error banner
//!
//! One message at a time. A new message replaces the current one; showing
//! returns a [`BannerTicket`] so the host's dismissal timer only hides the
//! message it was started for.

use std::time::Duration;

/// How long a banner stays up
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(5);

/// Identifies one appearance of the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerTicket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    message: Option<String>,
    generation: u64,
}

impl Banner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing whatever is visible
    pub fn show(&mut self, message: impl Into<String>) -> BannerTicket {
        self.generation += 1;
        self.message = Some(message.into());
        BannerTicket(self.generation)
    }

    /// Hide the banner if it still shows the message `ticket` was issued for.
    ///
    /// Returns whether anything was hidden.
    pub fn dismiss(&mut self, ticket: BannerTicket) -> bool {
        if ticket.0 == self.generation && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }

    /// Hide unconditionally
    pub fn clear(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_dismiss() {
        let mut banner = Banner::new();
        assert!(!banner.is_visible());

        let ticket = banner.show("boom");
        assert_eq!(banner.message(), Some("boom"));

        assert!(banner.dismiss(ticket));
        assert!(!banner.is_visible());
        assert!(!banner.dismiss(ticket));
    }

    #[test]
    fn test_newer_message_overwrites() {
        let mut banner = Banner::new();
        let first = banner.show("first");
        let second = banner.show("second");
        assert_eq!(banner.message(), Some("second"));

        // The first message's timer fires: the second stays up
        assert!(!banner.dismiss(first));
        assert_eq!(banner.message(), Some("second"));

        assert!(banner.dismiss(second));
        assert_eq!(banner.message(), None);
    }

    #[test]
    fn test_clear() {
        let mut banner = Banner::new();
        let ticket = banner.show("x");
        banner.clear();
        assert!(!banner.is_visible());
        assert!(!banner.dismiss(ticket));
    }

    #[test]
    fn test_timeout_is_five_seconds() {
        assert_eq!(BANNER_TIMEOUT.as_millis(), 5000);
    }
}
