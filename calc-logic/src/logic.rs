use calc_compute::{preprocess::is_operator_str, EvalOptions, Evaluation, Evaluator, Locale};
use calc_error::Error;
use calc_graph::Sampler;
use crate::{
    display::{CalculatorDisplay, Scroll},
    history::{History, MARKER_EVALUATE_ON_RESUME},
};
use tracing::{debug, trace};

/// What the next press of the delete key does.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DeleteMode {
    /// Delete the character before the cursor.
    #[default]
    Backspace,

    /// Clear the whole display. Active right after a result or an error is shown.
    ClearAll,
}

/// Notified whenever the [`DeleteMode`] changes.
pub trait DeleteModeListener {
    /// Called with the new mode.
    fn on_delete_mode_change(&mut self, mode: DeleteMode);
}

impl<F> DeleteModeListener for F
where
    F: FnMut(DeleteMode),
{
    fn on_delete_mode_change(&mut self, mode: DeleteMode) {
        self(mode)
    }
}

/// The calculator logic: mediates between the display, the history, the evaluator and the graph.
pub struct Logic<D, H> {
    display: D,
    history: H,
    evaluator: Evaluator,
    sampler: Option<Sampler>,
    listener: Option<Box<dyn DeleteModeListener>>,

    /// The last result shown on the display, or the error text if [`Logic::is_error`].
    result: String,
    is_error: bool,
    delete_mode: DeleteMode,
    last_error: Option<Error>,
}

impl<D, H> std::fmt::Debug for Logic<D, H>
where
    D: std::fmt::Debug,
    H: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logic")
            .field("display", &self.display)
            .field("history", &self.history)
            .field("evaluator", &self.evaluator)
            .field("sampler", &self.sampler)
            .field("result", &self.result)
            .field("is_error", &self.is_error)
            .field("delete_mode", &self.delete_mode)
            .finish_non_exhaustive()
    }
}

impl<D: CalculatorDisplay, H: History> Logic<D, H> {
    /// Creates the logic over the given display and history.
    pub fn new(display: D, history: H, locale: Locale, options: EvalOptions) -> Self {
        Self {
            display,
            history,
            evaluator: Evaluator::new(locale, options),
            sampler: None,
            listener: None,
            result: String::new(),
            is_error: false,
            delete_mode: DeleteMode::Backspace,
            last_error: None,
        }
    }

    /// Sets the sampler that graphs equations as they are typed.
    pub fn set_sampler(&mut self, sampler: Sampler) {
        self.sampler = Some(sampler);
    }

    /// Installs the delete-mode listener.
    pub fn set_listener(&mut self, listener: impl DeleteModeListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Sets the number of characters the display can show.
    pub fn set_line_length(&mut self, length: usize) {
        self.evaluator.set_width(length);
    }

    /// Changes the delete mode, notifying the listener if it actually changed.
    pub fn set_delete_mode(&mut self, mode: DeleteMode) {
        if self.delete_mode == mode {
            return;
        }

        trace!(?mode, "delete mode changed");
        self.delete_mode = mode;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_delete_mode_change(mode);
        }
    }

    /// Returns whether delete currently removes one character or clears the display.
    pub fn delete_mode(&self) -> DeleteMode {
        self.delete_mode
    }

    /// Returns the display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Returns the display mutably. Edits made through it bypass the delete mode and the sampler.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Returns the input history.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns the evaluator used by [`Logic::on_enter`] and [`Logic::evaluate`].
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Returns the last result shown, or the error text if an error is shown.
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Returns true if the display shows the error text of a failed evaluation.
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Returns the error of the last failed evaluation, if the last evaluation failed.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Returns the text on the display.
    pub fn text(&self) -> &str {
        self.display.text()
    }

    /// Returns true if the cursor cannot move any further in the given direction, so the move
    /// should be consumed.
    pub fn eat_horizontal_move(&self, to_left: bool) -> bool {
        let cursor = self.display.selection_start();
        if to_left {
            cursor == 0
        } else {
            cursor >= self.text().chars().count()
        }
    }

    /// Inserts text at the cursor and updates the graph.
    pub fn insert(&mut self, delta: &str) {
        self.display.insert(delta);
        self.set_delete_mode(DeleteMode::Backspace);
        self.update_graph();
    }

    /// Called when the display text is edited directly.
    pub fn on_text_changed(&mut self) {
        self.set_delete_mode(DeleteMode::Backspace);
    }

    /// Returns true if `delta` may be inserted as is.
    ///
    /// Nothing may be inserted while an error is shown. While a result is shown with the cursor at
    /// the end, only operators may be appended to it; anything else should replace the result.
    pub fn accept_insert(&self, delta: &str) -> bool {
        let text = self.text();
        !self.is_error
            && (self.result != text
                || is_operator_str(delta)
                || self.display.selection_start() != text.chars().count())
    }

    /// Handles the delete key: clears a result or an error, or deletes one character.
    pub fn on_delete(&mut self) {
        if self.text() == self.result || self.is_error {
            self.clear(false);
        } else {
            self.display.dispatch_delete();
            self.result.clear();
        }
        self.update_graph();
    }

    /// Handles the clear key, scrolling the display if a result was being shown.
    pub fn on_clear(&mut self) {
        self.clear(self.delete_mode == DeleteMode::ClearAll);
    }

    /// Clears the display, committing an empty entry to the history.
    pub fn clear(&mut self, scroll: bool) {
        self.history.enter("");
        self.display.set_text("", if scroll { Scroll::Up } else { Scroll::None });
        self.cleared();
    }

    /// Resets the state after the display was cleared.
    pub fn cleared(&mut self) {
        self.result.clear();
        self.is_error = false;
        self.last_error = None;
        self.update_history();
        self.set_delete_mode(DeleteMode::Backspace);
    }

    /// Handles the enter key: evaluates the display, or restores the history entry if a result is
    /// already shown.
    pub fn on_enter(&mut self) {
        if self.delete_mode == DeleteMode::ClearAll {
            self.clear_with_history(false);
        } else {
            let text = self.text().to_string();
            self.evaluate_and_show_result(&text, Scroll::Up);
        }
    }

    /// Restores the display from the history, e.g. when the calculator is reopened.
    pub fn resume_with_history(&mut self) {
        self.clear_with_history(false);
    }

    fn clear_with_history(&mut self, scroll: bool) {
        if self.history.text() == MARKER_EVALUATE_ON_RESUME {
            let text = if self.history.move_to_previous() {
                self.history.text().to_string()
            } else {
                String::new()
            };
            self.evaluate_and_show_result(&text, Scroll::None);
        } else {
            let text = self.history.text().to_string();
            self.result.clear();
            self.display.set_text(&text, if scroll { Scroll::Up } else { Scroll::None });
            self.is_error = false;
        }
    }

    /// Evaluates `text` and shows the outcome on the display.
    ///
    /// A value different from `text` is committed to the history along with `text`. An error
    /// shows the locale's error text. Either way, the next delete clears the display. An equation
    /// to plot is left on the display and handed to the graph.
    pub fn evaluate_and_show_result(&mut self, text: &str, scroll: Scroll) {
        match self.evaluate(text) {
            Ok(Evaluation::Curve(equation)) => {
                debug!(text, ?equation, "equation has no single value");
                self.last_error = None;
                self.update_graph();
            },
            Ok(evaluation) => {
                self.last_error = None;
                let result = evaluation.display_text().unwrap_or_default().to_string();
                if result != text {
                    self.history.enter(text);
                    self.display.set_text(&result, scroll);
                    self.result = result;
                    self.set_delete_mode(DeleteMode::ClearAll);
                }
            },
            Err(err) => {
                self.is_error = true;
                self.result = self.evaluator.locale().error.clone();
                self.display.set_text(&self.result, scroll);
                self.last_error = Some(err);
                self.set_delete_mode(DeleteMode::ClearAll);
            },
        }
    }

    /// Moves to the previous history entry, saving the edited display text first.
    pub fn on_up(&mut self) {
        self.save_edit();
        if self.history.move_to_previous() {
            let text = self.history.text().to_string();
            self.display.set_text(&text, Scroll::Down);
        }
    }

    /// Moves to the next history entry, saving the edited display text first.
    pub fn on_down(&mut self) {
        self.save_edit();
        if self.history.move_to_next() {
            let text = self.history.text().to_string();
            self.display.set_text(&text, Scroll::Up);
        }
    }

    fn save_edit(&mut self) {
        if self.text() != self.result {
            let text = self.text().to_string();
            self.history.update(&text);
        }
    }

    /// Stores the display in the current history entry. A computed result is stored as
    /// [`MARKER_EVALUATE_ON_RESUME`], so it is recomputed instead of shown literally.
    pub fn update_history(&mut self) {
        let text = self.text();
        let computed = !text.is_empty()
            && text != self.evaluator.locale().error
            && text == self.result;
        let entry = if computed { MARKER_EVALUATE_ON_RESUME.to_string() } else { text.to_string() };
        self.history.update(&entry);
    }

    /// Hands the display text to the sampler, if any.
    pub fn update_graph(&mut self) {
        let text = self.display.text();
        if let Some(sampler) = self.sampler.as_mut() {
            sampler.dispatch(text);
        }
    }

    /// Evaluates `text` with the configured locale and display width.
    pub fn evaluate(&self, text: &str) -> Result<Evaluation, Error> {
        self.evaluator.evaluate(text)
    }
}

#[cfg(test)]
mod tests {
    use calc_compute::error::SyntaxError;
    use calc_graph::{CurveSeries, GraphSink, SamplerOptions};
    use crate::{display::TextDisplay, history::MemoryHistory};
    use flume::Sender;
    use pretty_assertions::assert_eq;
    use std::{sync::Arc, time::Duration};
    use super::*;

    fn logic() -> Logic<TextDisplay, MemoryHistory> {
        Logic::new(TextDisplay::new(), MemoryHistory::new(), Locale::default(), EvalOptions::default())
    }

    fn type_and_enter(logic: &mut Logic<TextDisplay, MemoryHistory>, text: &str) {
        logic.insert(text);
        logic.on_enter();
    }

    #[test]
    fn enter_shows_result() {
        let mut logic = logic();
        type_and_enter(&mut logic, "2+2");
        assert_eq!(logic.text(), "4");
        assert_eq!(logic.result(), "4");
        assert_eq!(logic.delete_mode(), DeleteMode::ClearAll);
        assert_eq!(logic.display().last_scroll(), Scroll::Up);
        assert_eq!(logic.history().committed().collect::<Vec<_>>(), ["2+2"]);
    }

    #[test]
    fn enter_shows_error() {
        let mut logic = logic();
        type_and_enter(&mut logic, "1/0");
        assert_eq!(logic.text(), "Error");
        assert!(logic.is_error());
        assert_eq!(logic.delete_mode(), DeleteMode::ClearAll);
        assert!(logic.last_error().is_some());
        assert!(!logic.accept_insert("5"));
    }

    #[test]
    fn error_kind_is_kept() {
        let mut logic = logic();
        type_and_enter(&mut logic, "2+*3");
        assert!(logic.last_error().unwrap().is::<SyntaxError>());

        logic.on_delete();
        assert!(logic.last_error().is_none());
        assert!(!logic.is_error());
        assert_eq!(logic.text(), "");
    }

    #[test]
    fn unchanged_result_is_not_committed() {
        let mut logic = logic();
        type_and_enter(&mut logic, "4");
        assert_eq!(logic.text(), "4");
        assert_eq!(logic.delete_mode(), DeleteMode::Backspace);
        assert!(logic.history().is_empty());
    }

    #[test]
    fn delete_clears_result() {
        let mut logic = logic();
        type_and_enter(&mut logic, "6\u{00f7}2");
        logic.on_delete();
        assert_eq!(logic.text(), "");
        assert_eq!(logic.delete_mode(), DeleteMode::Backspace);
    }

    #[test]
    fn delete_backspaces() {
        let mut logic = logic();
        logic.insert("123");
        logic.on_delete();
        assert_eq!(logic.text(), "12");
        assert_eq!(logic.result(), "");
    }

    #[test]
    fn accept_insert_after_result() {
        let mut logic = logic();
        type_and_enter(&mut logic, "1+2");
        assert!(logic.accept_insert("+"));
        assert!(logic.accept_insert("\u{00d7}"));
        assert!(!logic.accept_insert("7"));
        assert!(!logic.accept_insert("++"));

        logic.display_mut().set_selection(0);
        assert!(logic.accept_insert("7"));
    }

    #[test]
    fn appending_operator_continues() {
        let mut logic = logic();
        type_and_enter(&mut logic, "1+2");
        logic.insert("\u{00d7}2");
        assert_eq!(logic.delete_mode(), DeleteMode::Backspace);
        logic.on_enter();
        assert_eq!(logic.text(), "6");
    }

    #[test]
    fn listener_sees_changes_only() {
        let (tx, rx) = flume::unbounded();
        let mut logic = logic();
        logic.set_listener(move |mode: DeleteMode| {
            let _ = tx.send(mode);
        });

        logic.set_delete_mode(DeleteMode::Backspace);
        type_and_enter(&mut logic, "2+2");
        logic.set_delete_mode(DeleteMode::ClearAll);
        logic.on_text_changed();
        logic.on_text_changed();

        assert_eq!(rx.try_iter().collect::<Vec<_>>(), [DeleteMode::ClearAll, DeleteMode::Backspace]);
    }

    #[test]
    fn clear_scrolls_after_result() {
        let mut logic = logic();
        type_and_enter(&mut logic, "2+2");
        logic.on_clear();
        assert_eq!(logic.text(), "");
        assert_eq!(logic.display().last_scroll(), Scroll::Up);

        logic.insert("5");
        logic.on_clear();
        assert_eq!(logic.display().last_scroll(), Scroll::None);
    }

    #[test]
    fn browse_history() {
        let mut logic = logic();
        type_and_enter(&mut logic, "1+1");
        logic.on_clear();
        type_and_enter(&mut logic, "2+3");
        logic.on_clear();
        logic.insert("9");

        logic.on_up();
        assert_eq!(logic.display().last_scroll(), Scroll::Down);
        // the clear committed an empty entry after each result
        assert_eq!(logic.text(), "");
        logic.on_up();
        assert_eq!(logic.text(), "2+3");
        logic.on_down();
        logic.on_down();
        assert_eq!(logic.display().last_scroll(), Scroll::Up);
        assert_eq!(logic.text(), "9");
    }

    #[test]
    fn resume_recomputes_result() {
        let mut logic = logic();
        type_and_enter(&mut logic, "2\u{00d7}21");
        logic.update_history();
        assert_eq!(logic.history().text(), MARKER_EVALUATE_ON_RESUME);

        // the display is gone, e.g. after a restart
        logic.display_mut().set_text("", Scroll::None);
        logic.resume_with_history();
        assert_eq!(logic.text(), "42");
        assert_eq!(logic.delete_mode(), DeleteMode::ClearAll);
    }

    #[test]
    fn resume_shows_literal_text() {
        let mut logic = logic();
        logic.insert("7+");
        logic.update_history();
        logic.display_mut().set_text("", Scroll::None);
        logic.resume_with_history();
        assert_eq!(logic.text(), "7+");
        assert_eq!(logic.result(), "");
    }

    #[test]
    fn enter_after_result_restores_history() {
        let mut logic = logic();
        type_and_enter(&mut logic, "3\u{2212}1");
        logic.update_history();
        logic.on_enter();
        assert_eq!(logic.text(), "2");
    }

    #[test]
    fn error_is_not_marked() {
        let mut logic = logic();
        type_and_enter(&mut logic, "0/0");
        logic.update_history();
        assert_eq!(logic.history().text(), "Error");
    }

    #[test]
    fn line_length() {
        let mut logic = logic();
        logic.set_line_length(8);
        type_and_enter(&mut logic, "0\u{2212}0.00001");
        assert_eq!(logic.text(), "\u{2212}1e-5");
    }

    #[test]
    fn horizontal_moves() {
        let mut logic = logic();
        assert!(logic.eat_horizontal_move(true));
        assert!(logic.eat_horizontal_move(false));

        logic.insert("12");
        assert!(!logic.eat_horizontal_move(true));
        assert!(logic.eat_horizontal_move(false));
        logic.display_mut().set_selection(1);
        assert!(!logic.eat_horizontal_move(false));
    }

    struct ChannelSink(Sender<CurveSeries>);

    impl GraphSink for ChannelSink {
        fn replace_series(&self, series: CurveSeries) {
            let _ = self.0.send(series);
        }
    }

    #[test]
    fn typing_equation_graphs_it() {
        let (tx, rx) = flume::unbounded();
        let locale = Locale::default();
        let mut logic = logic();
        logic.set_sampler(Sampler::new(Arc::new(ChannelSink(tx)), locale, SamplerOptions::default()));

        logic.insert("y=2x+");
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        logic.insert("1");
        let series = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(series.title, "Graph: y=2x+1");
        assert_eq!(series.len(), 201);

        // an equation stays on the display when entered
        logic.on_enter();
        assert_eq!(logic.text(), "y=2x+1");
        assert!(!logic.is_error());
        let series = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(series.title, "Graph: y=2x+1");

        logic.on_clear();
        logic.on_delete();
        assert_eq!(rx.recv_timeout(Duration::from_secs(10)).unwrap(), CurveSeries::empty("Graph: "));
    }
}
