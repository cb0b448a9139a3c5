/// Sink for the widgets a screensaver wants in its configuration view.
///
/// The host lays the controls out and reports edits back through
/// [`ScreenSaver::on_event`](crate::saver::ScreenSaver::on_event).
pub trait ConfigPanel {
    fn add_label(&mut self, text: &str, bold: bool);

    fn add_text_control(&mut self, name: &str, label: &str, value: &str);

    fn add_slider(&mut self, name: &str, label: &str, min: i32, max: i32, value: i32);
}
