//! Presentation controls: theme, auto-save, font size, alignment.

use super::DispatchResult;
use crate::Action;
use core_model::EditorModel;

pub(crate) fn handle_toggle(action: Action, model: &mut EditorModel) -> DispatchResult {
    let view = &mut model.view;
    match action {
        Action::ToggleTheme => {
            view.theme = view.theme.toggled();
            tracing::debug!(target: "actions.dispatch", theme = view.theme.as_str(), "theme_toggled");
        }
        Action::ToggleAutosave => {
            view.autosave = !view.autosave;
            tracing::info!(target: "autosave", enabled = view.autosave, "autosave_toggled");
            view.info(if view.autosave {
                "Auto-save on"
            } else {
                "Auto-save off"
            });
            return DispatchResult {
                dirty: true,
                autosave_toggled: true,
                ..DispatchResult::default()
            };
        }
        Action::FontSmaller => view.font_size = view.font_size.smaller(),
        Action::FontLarger => view.font_size = view.font_size.larger(),
        Action::Align(a) => view.alignment = a,
        _ => return DispatchResult::clean(),
    }
    DispatchResult::dirty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_config::{Alignment, Theme};

    #[test]
    fn theme_and_alignment_reflect_last_toggle() {
        let mut m = EditorModel::default();
        handle_toggle(Action::ToggleTheme, &mut m);
        assert_eq!(m.view.theme, Theme::Light);
        handle_toggle(Action::Align(Alignment::Right), &mut m);
        handle_toggle(Action::Align(Alignment::Center), &mut m);
        assert_eq!(m.view.alignment, Alignment::Center);
    }

    #[test]
    fn font_size_steps_through_fixed_set() {
        let mut m = EditorModel::default();
        for _ in 0..10 {
            handle_toggle(Action::FontLarger, &mut m);
        }
        assert_eq!(m.view.font_size.px(), 32);
        handle_toggle(Action::FontSmaller, &mut m);
        assert_eq!(m.view.font_size.px(), 28);
    }

    #[test]
    fn autosave_toggle_is_flagged() {
        let mut m = EditorModel::default();
        let r = handle_toggle(Action::ToggleAutosave, &mut m);
        assert!(r.autosave_toggled);
        assert!(!m.view.autosave);
    }
}
