use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Up};

    // Global quit shortcut
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match app.screen {
        Screen::RegionSelect => match key.code {
            Char('q') | Esc => return Action::Quit,
            Up | Char('k') => {
                app.region_list_index = app.region_list_index.saturating_sub(1);
            }
            Down | Char('j') => {
                if app.region_list_index + 1 < app.regions.len() {
                    app.region_list_index += 1;
                }
            }
            Enter | Char(' ') => {
                app.select_current_region();
            }
            _ => {}
        },

        // Every printable key belongs to the search box here.
        Screen::Lookup => match key.code {
            Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.query.clear();
                app.on_query_changed();
            }
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.query.push(character);
                    app.on_query_changed();
                }
            }
            Backspace => {
                if app.query.pop().is_some() {
                    app.on_query_changed();
                }
            }
            Esc => {
                app.back_to_regions();
            }
            _ => {}
        },
    }
    Action::None
}
