use crate::color_utils::Rgb;
use crate::engine::EngineStats;
use crate::harmony::GenerationMode;
use crate::history::History;
use crate::model::{ColorFormat, ExportFormat, Palette, Preset};

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum Panel {
    Details,
    History,
    Export,
}

#[derive(PartialEq, Clone, Copy, Debug)]
pub enum InputMode {
    Normal,
    Importing,
    EditingColor,
}

pub struct AppState {
    pub palette: Palette,
    pub history: History,
    pub selected: usize,
    pub mode: GenerationMode,
    pub creativity: f64,
    pub preset: Preset,
    pub color_format: ColorFormat,
    pub export_format: ExportFormat,
    pub panel: Panel,
    pub stats: EngineStats,
    pub training: Option<usize>,
    pub message: String,
    pub loading: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub cursor_position: usize,
}

impl AppState {
    pub fn new(mode: GenerationMode, creativity: f64) -> Self {
        Self {
            palette: vec![],
            history: History::default(),
            selected: 0,
            mode,
            creativity: creativity.clamp(0.0, 1.0),
            preset: Preset::default(),
            color_format: ColorFormat::default(),
            export_format: ExportFormat::default(),
            panel: Panel::Details,
            stats: EngineStats::default(),
            training: None,
            message: "Space: New | l/d: Like/Dislike | m: Mode | q: Quit".to_string(),
            loading: true,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
        }
    }

    pub fn selected_color(&self) -> Option<Rgb> {
        self.palette.get(self.selected).copied()
    }

    /// Keeps the selection inside the palette after it changes size.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
        if self.selected >= self.palette.len() {
            self.selected = self.palette.len().saturating_sub(1);
        }
    }

    pub fn next(&mut self) {
        let len = self.palette.len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected >= len - 1 {
            0
        } else {
            self.selected + 1
        };
    }

    pub fn previous(&mut self) {
        let len = self.palette.len();
        if len == 0 {
            return;
        }
        self.selected = if self.selected == 0 {
            len - 1
        } else {
            self.selected - 1
        };
    }

    pub fn adjust_creativity(&mut self, delta: f64) {
        // keep one decimal so repeated steps land on 0.0 and 1.0 exactly
        self.creativity = ((self.creativity + delta) * 10.0).round().clamp(0.0, 10.0) / 10.0;
    }

    pub fn toggle_panel(&mut self, panel: Panel) {
        self.panel = if self.panel == panel {
            Panel::Details
        } else {
            panel
        };
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    fn byte_index(&self) -> usize {
        self.input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len())
    }
    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.input_buffer.insert(index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let from_left_to_current_index = current_index - 1;
            let before_char_to_delete = self.input_buffer.chars().take(from_left_to_current_index);
            let after_char_to_delete = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before_char_to_delete.chain(after_char_to_delete).collect();
            self.move_cursor_left();
        }
    }
    pub fn start_input(&mut self, mode: InputMode, initial: String) {
        self.input_mode = mode;
        self.cursor_position = initial.chars().count();
        self.input_buffer = initial;
    }
    pub fn reset_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_palette() -> AppState {
        let mut state = AppState::new(GenerationMode::Random, 0.5);
        state.set_palette(vec![Rgb::BLACK; 5]);
        state
    }

    #[test]
    fn selection_wraps() {
        let mut state = state_with_palette();
        state.previous();
        assert_eq!(state.selected, 4);
        state.next();
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn shrinking_palette_clamps_selection() {
        let mut state = state_with_palette();
        state.selected = 4;
        state.set_palette(vec![Rgb::BLACK; 2]);
        assert_eq!(state.selected, 1);
    }

    #[test]
    fn creativity_steps_are_clean() {
        let mut state = AppState::new(GenerationMode::Adaptive, 0.5);
        for _ in 0..7 {
            state.adjust_creativity(0.1);
        }
        assert_eq!(state.creativity, 1.0);
        for _ in 0..3 {
            state.adjust_creativity(-0.1);
        }
        assert_eq!(state.creativity, 0.7);
    }

    #[test]
    fn input_editing() {
        let mut state = state_with_palette();
        state.start_input(InputMode::EditingColor, "#ff00".to_string());
        state.enter_char('f');
        state.move_cursor_left();
        state.move_cursor_left();
        state.delete_char();
        assert_eq!(state.input_buffer, "#ff0f");
        state.reset_input();
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.input_buffer.is_empty());
    }
}
