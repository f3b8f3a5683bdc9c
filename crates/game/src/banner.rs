//! Transient error banner shown after a failed frame.

/// Frames a banner stays visible (about two seconds at 60 Hz).
pub const BANNER_FRAMES: u32 = 120;

/// Holds the latest frame error until it times out.
#[derive(Debug, Default)]
pub struct Banner {
    message: Option<String>,
    frames_left: u32,
}

impl Banner {
    /// Advance one displayed frame, then show the frame's error if it had one.
    /// A message stays up for exactly `BANNER_FRAMES` frames, this one included.
    pub fn next_frame(&mut self, error: Option<String>) {
        self.tick();
        if let Some(message) = error {
            self.show(message);
        }
    }

    /// Show a message, replacing any current one and restarting the timeout.
    fn show(&mut self, message: String) {
        self.message = Some(message);
        self.frames_left = BANNER_FRAMES;
    }

    /// Count down one frame; clears the message when the timeout runs out.
    fn tick(&mut self) {
        if self.frames_left > 0 {
            self.frames_left -= 1;
        }
        if self.frames_left == 0 {
            self.message = None;
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// Window title: overlay readout plus the banner if one is up.
pub fn window_title(overlay: &str, banner: Option<&str>) -> String {
    match (overlay.is_empty(), banner) {
        (true, None) => "Flight Simulator".to_string(),
        (true, Some(msg)) => format!("Flight Simulator | ERROR: {msg}"),
        (false, None) => format!("Flight Simulator | {overlay}"),
        (false, Some(msg)) => format!("Flight Simulator | {overlay} | ERROR: {msg}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_expires_after_timeout() {
        let mut banner = Banner::default();
        banner.show("surface lost".to_string());
        for _ in 0..BANNER_FRAMES - 1 {
            banner.tick();
            assert_eq!(banner.message(), Some("surface lost"));
        }
        banner.tick();
        assert_eq!(banner.message(), None);
    }

    #[test]
    fn repeated_errors_keep_banner_up() {
        let mut banner = Banner::default();
        for _ in 0..BANNER_FRAMES * 3 {
            banner.next_frame(Some("surface lost".to_string()));
        }
        assert!(banner.message().is_some());
    }

    #[test]
    fn one_error_is_visible_for_banner_frames_frames() {
        let mut banner = Banner::default();
        banner.next_frame(Some("surface lost".to_string()));
        let mut visible = usize::from(banner.message().is_some());
        for _ in 0..BANNER_FRAMES * 2 {
            banner.next_frame(None);
            visible += usize::from(banner.message().is_some());
        }
        assert_eq!(visible, BANNER_FRAMES as usize);
    }

    #[test]
    fn title_includes_banner() {
        assert_eq!(window_title("", None), "Flight Simulator");
        assert_eq!(
            window_title("x=0, y=200, z=0 | speed 0.00", Some("boom")),
            "Flight Simulator | x=0, y=200, z=0 | speed 0.00 | ERROR: boom"
        );
    }
}
