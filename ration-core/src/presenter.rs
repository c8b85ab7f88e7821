//! The seam between handlers and whatever actually shows things to the user.

use std::fmt;

use crate::error::FieldErrors;
use crate::notify::Notification;
use crate::view::ViewModel;

/// Dialogs a handler can open or close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    AddProduct,
    EditProduct,
    AddUnplannedMeal,
    Onboarding,
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::AddProduct => write!(f, "add-product"),
            Panel::EditProduct => write!(f, "edit-product"),
            Panel::AddUnplannedMeal => write!(f, "unplanned-meal"),
            Panel::Onboarding => write!(f, "onboarding"),
        }
    }
}

pub trait Presenter {
    /// Replace whatever is shown for the view's surface.
    fn render(&mut self, view: &ViewModel);

    fn notify(&mut self, notification: Notification);

    /// Show validation messages next to the fields of a form.
    fn field_errors(&mut self, panel: Panel, errors: &FieldErrors);

    fn open_panel(&mut self, panel: Panel);

    fn close_panel(&mut self, panel: Panel);

    /// Ask a yes/no question. `false` cancels the action.
    fn confirm(&mut self, message: &str) -> bool;
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    /// Everything a handler asked the presenter to do, in order.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Render(ViewModel),
        Notify(Notification),
        FieldErrors(Panel, FieldErrors),
        Open(Panel),
        Close(Panel),
        Confirm(String),
    }

    #[derive(Debug, Default)]
    pub struct RecordingPresenter {
        pub calls: Vec<Call>,
        pub confirm_answer: bool,
    }

    impl RecordingPresenter {
        pub fn new() -> Self {
            Self {
                calls: Vec::new(),
                confirm_answer: true,
            }
        }

        pub fn declining() -> Self {
            Self {
                calls: Vec::new(),
                confirm_answer: false,
            }
        }

        pub fn notifications(&self) -> Vec<&Notification> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Notify(n) => Some(n),
                    _ => None,
                })
                .collect()
        }

        pub fn renders(&self) -> Vec<&ViewModel> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    Call::Render(v) => Some(v),
                    _ => None,
                })
                .collect()
        }
    }

    impl Presenter for RecordingPresenter {
        fn render(&mut self, view: &ViewModel) {
            self.calls.push(Call::Render(view.clone()));
        }

        fn notify(&mut self, notification: Notification) {
            self.calls.push(Call::Notify(notification));
        }

        fn field_errors(&mut self, panel: Panel, errors: &FieldErrors) {
            self.calls.push(Call::FieldErrors(panel, errors.clone()));
        }

        fn open_panel(&mut self, panel: Panel) {
            self.calls.push(Call::Open(panel));
        }

        fn close_panel(&mut self, panel: Panel) {
            self.calls.push(Call::Close(panel));
        }

        fn confirm(&mut self, message: &str) -> bool {
            self.calls.push(Call::Confirm(message.to_string()));
            self.confirm_answer
        }
    }
}
