use log::{info, warn};

/// Receiver of human-readable progress and error notifications.
///
/// Notifications are fire-and-forget: nothing reported here changes the
/// outcome of an operation. Any `FnMut(&str)` closure is a viewer that gets
/// both kinds of message.
pub trait Viewer {
    fn update(&mut self, message: &str);
    fn show_error(&mut self, message: &str);
}

impl<F: FnMut(&str)> Viewer for F {
    fn update(&mut self, message: &str) {
        self(message)
    }

    fn show_error(&mut self, message: &str) {
        self(message)
    }
}

/// Forwards notifications to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogViewer;

impl Viewer for LogViewer {
    fn update(&mut self, message: &str) {
        info!("{}", message);
    }

    fn show_error(&mut self, message: &str) {
        warn!("{}", message);
    }
}
