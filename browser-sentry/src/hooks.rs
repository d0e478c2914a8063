use crate::{dialog::ReportDialog, protocol::Event, Hint};

/// `before_send` hook which asks the user for feedback on every exception.
///
/// Events are never modified or dropped, the dialog is a side effect only.
pub fn report_dialog_on_exception<D>(
    dialog: D,
) -> impl Fn(Event, Option<&Hint>) -> Option<Event> + 'static
where
    D: ReportDialog + 'static,
{
    move |event: Event, _hint: Option<&Hint>| {
        if event.has_exception() {
            dialog.show(event.event_id);
        }
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::protocol::{Exception, Level};

    #[derive(Clone, Default)]
    struct RecordingDialog(Rc<RefCell<Vec<uuid::Uuid>>>);

    impl ReportDialog for RecordingDialog {
        fn show(&self, event_id: uuid::Uuid) {
            self.0.borrow_mut().push(event_id);
        }
    }

    #[test]
    fn test_exception_shows_dialog() {
        let dialog = RecordingDialog::default();
        let hook = report_dialog_on_exception(dialog.clone());

        let event = Event {
            exception: vec![Exception {
                ty: "Error".to_owned(),
                value: Some("boom".to_owned()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let result = hook(event.clone(), None);

        assert_eq!(result, Some(event.clone()));
        assert_eq!(*dialog.0.borrow(), vec![event.event_id]);
    }

    #[test]
    fn test_message_passes_through() {
        let dialog = RecordingDialog::default();
        let hook = report_dialog_on_exception(dialog.clone());

        let event = Event {
            message: Some("info log".to_owned()),
            level: Level::Info,
            ..Default::default()
        };
        let hint = Hint {
            original_exception: Some("ignored".to_owned()),
            ..Default::default()
        };

        assert_eq!(hook(event.clone(), Some(&hint)), Some(event));
        assert!(dialog.0.borrow().is_empty());
    }
}
