//! Host seams: user notices and navigation

/// User-visible notices
pub trait Notifier {
    /// Non-blocking acknowledgment (e.g. "Shoe added to your cart!")
    fn acknowledge(&mut self, message: &str);

    /// Blocking notice the user must dismiss
    fn blocking_notice(&mut self, message: &str);
}

/// Page navigation
pub trait Navigator {
    /// Leave the page for url
    fn navigate(&mut self, url: &str);
}

/// Host that records every notice and navigation
///
/// Useful for headless embeddings and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingHost {
    /// Acknowledgments in order
    pub acknowledgments: Vec<String>,
    /// Blocking notices in order
    pub notices: Vec<String>,
    /// Navigation targets in order
    pub navigations: Vec<String>,
}

impl RecordingHost {
    /// Last navigation target
    #[inline]
    #[must_use]
    pub fn last_navigation(&self) -> Option<&str> {
        self.navigations.last().map(String::as_str)
    }
}

impl Notifier for RecordingHost {
    fn acknowledge(&mut self, message: &str) {
        self.acknowledgments.push(message.to_string());
    }

    fn blocking_notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

impl Navigator for RecordingHost {
    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn acknowledge(&mut self, message: &str) {
        (**self).acknowledge(message);
    }

    fn blocking_notice(&mut self, message: &str) {
        (**self).blocking_notice(message);
    }
}

impl<T: Navigator + ?Sized> Navigator for &mut T {
    fn navigate(&mut self, url: &str) {
        (**self).navigate(url);
    }
}
