use std::time::Instant;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::{App, FocusPane};
use crate::tui::AppEvent;

/// Rows per template entry: name, services, "Use Template" link
pub const TEMPLATE_ROWS: u16 = 3;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        // Scroll offsets are reconciled with the new size on the next render
        AppEvent::Resize => {}
        AppEvent::Paste(text) => handle_paste(app, &text),
        AppEvent::Tick => app.tick(Instant::now()),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any pane
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Tab => {
            app.focus = app.focus.next();
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        _ => {}
    }

    match app.focus {
        FocusPane::Input => handle_input_editing(app, key),
        FocusPane::Chat => handle_chat_normal(app, key),
        FocusPane::QuickActions => handle_quick_actions(app, key),
        FocusPane::Templates => handle_templates(app, key),
    }
}

fn handle_input_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.focus = FocusPane::Chat;
        }
        // Shift+Enter is swallowed, the input is a single line
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {}
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => {
            if app.input_cursor > 0 {
                app.input_cursor -= 1;
                let input = app.session.input_mut();
                let byte_pos = char_to_byte_index(input, app.input_cursor);
                input.remove(byte_pos);
            }
        }
        KeyCode::Delete => {
            let input = app.session.input_mut();
            if app.input_cursor < input.chars().count() {
                let byte_pos = char_to_byte_index(input, app.input_cursor);
                input.remove(byte_pos);
            }
        }
        KeyCode::Left => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.session.input().chars().count();
            app.input_cursor = (app.input_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.input_cursor = 0;
        }
        KeyCode::End => {
            app.input_cursor = app.session.input().chars().count();
        }
        KeyCode::Char(c)
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            let input = app.session.input_mut();
            let byte_pos = char_to_byte_index(input, app.input_cursor);
            input.insert(byte_pos, c);
            app.input_cursor += 1;
        }
        _ => {}
    }
}

/// Insert pasted text at the cursor as a single line
fn handle_paste(app: &mut App, text: &str) {
    if app.focus != FocusPane::Input {
        return;
    }
    let text = text.replace("\r\n", " ").replace(['\r', '\n'], " ");
    let input = app.session.input_mut();
    let byte_pos = char_to_byte_index(input, app.input_cursor);
    input.insert_str(byte_pos, &text);
    app.input_cursor += text.chars().count();
}

/// Keys shared by every pane except the input
fn handle_common_normal(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('i') | KeyCode::Esc => {
            app.focus = FocusPane::Input;
            app.input_cursor = app.session.input().chars().count();
        }
        KeyCode::Char('h') => app.view_history(),
        KeyCode::Char('t') => app.toggle_theme(),
        _ => return false,
    }
    true
}

fn handle_chat_normal(app: &mut App, key: KeyEvent) {
    if handle_common_normal(app, key) {
        return;
    }
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.scroll_chat_down(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_chat_up(1),
        KeyCode::PageDown => app.scroll_chat_down(app.chat_height.max(1)),
        KeyCode::PageUp => app.scroll_chat_up(app.chat_height.max(1)),
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_chat_down((app.chat_height / 2).max(1));
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_chat_up((app.chat_height / 2).max(1));
        }
        KeyCode::Char('g') => app.scroll_chat_to_top(),
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),
        _ => {}
    }
}

fn handle_quick_actions(app: &mut App, key: KeyEvent) {
    if handle_common_normal(app, key) {
        return;
    }
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.query_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.query_nav_up(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(i) = app.query_state.selected() {
                app.select_query(i);
            }
        }
        // 1-4 pick a suggestion directly
        KeyCode::Char(c @ '1'..='9') => {
            let idx = (c as usize) - ('1' as usize);
            app.select_query(idx);
        }
        _ => {}
    }
}

fn handle_templates(app: &mut App, key: KeyEvent) {
    if handle_common_normal(app, key) {
        return;
    }
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.template_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.template_nav_up(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(i) = app.template_state.selected() {
                app.select_template(i);
            }
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

/// Index of the list row under `y`, for a bordered list with `rows_per_item`.
fn list_index_at(y: u16, area: Rect, offset: usize, rows_per_item: u16) -> Option<usize> {
    let first_row = area.y + 1;
    let last_row = area.y + area.height.saturating_sub(1);
    if y < first_row || y >= last_row {
        return None;
    }
    Some(offset + ((y - first_row) / rows_per_item) as usize)
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_chat = app.chat_area.is_some_and(|r| point_in_rect(x, y, r));
    let in_input = app.input_area.is_some_and(|r| point_in_rect(x, y, r));
    let in_queries = app.queries_area.is_some_and(|r| point_in_rect(x, y, r));
    let in_templates = app.templates_area.is_some_and(|r| point_in_rect(x, y, r));

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if in_chat {
                app.scroll_chat_down(3);
            } else if in_queries {
                app.query_nav_down();
            } else if in_templates {
                app.template_nav_down();
            }
        }
        MouseEventKind::ScrollUp => {
            if in_chat {
                app.scroll_chat_up(3);
            } else if in_queries {
                app.query_nav_up();
            } else if in_templates {
                app.template_nav_up();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if in_input {
                app.focus = FocusPane::Input;
            } else if in_chat {
                app.focus = FocusPane::Chat;
            } else if let Some(area) = app.queries_area.filter(|_| in_queries) {
                app.focus = FocusPane::QuickActions;
                if let Some(i) = list_index_at(y, area, app.query_state.offset(), 1) {
                    app.select_query(i);
                }
            } else if let Some(area) = app.templates_area.filter(|_| in_templates) {
                app.focus = FocusPane::Templates;
                if let Some(i) = list_index_at(y, area, app.template_state.offset(), TEMPLATE_ROWS) {
                    app.select_template(i);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudai_core::{ChatRole, Config, Theme};
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> AppEvent {
        AppEvent::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)));
        }
    }

    fn test_app() -> App {
        App::new(&Config::new(), None)
    }

    #[tokio::test]
    async fn test_enter_submits() {
        let mut app = test_app();
        type_text(&mut app, "What is the cost?");
        handle_event(&mut app, key(KeyCode::Enter));

        assert!(app.is_composing());
        assert_eq!(app.session.len(), 2);
        assert_eq!(app.session.messages()[1].role, ChatRole::User);
        assert_eq!(app.session.messages()[1].content, "What is the cost?");
        assert!(app.session.input().is_empty());
    }

    #[tokio::test]
    async fn test_shift_enter_does_not_submit() {
        let mut app = test_app();
        type_text(&mut app, "deploy");
        handle_event(&mut app, key_with(KeyCode::Enter, KeyModifiers::SHIFT));

        assert!(!app.is_composing());
        assert_eq!(app.session.input(), "deploy");
    }

    #[tokio::test]
    async fn test_enter_while_composing_is_ignored() {
        let mut app = test_app();
        type_text(&mut app, "deploy");
        handle_event(&mut app, key(KeyCode::Enter));
        type_text(&mut app, "cost");
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.session.len(), 2);
        assert_eq!(app.session.input(), "cost");
    }

    #[test]
    fn test_cursor_editing_is_utf8_safe() {
        let mut app = test_app();
        type_text(&mut app, "héllo");
        handle_event(&mut app, key(KeyCode::Left));
        handle_event(&mut app, key(KeyCode::Left));
        handle_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.session.input(), "hélo");

        handle_event(&mut app, key(KeyCode::Home));
        handle_event(&mut app, key(KeyCode::Delete));
        assert_eq!(app.session.input(), "élo");

        handle_event(&mut app, key(KeyCode::End));
        type_text(&mut app, "!");
        assert_eq!(app.session.input(), "élo!");
    }

    #[test]
    fn test_ctrl_chars_are_not_inserted() {
        let mut app = test_app();
        handle_event(&mut app, key_with(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(app.session.input().is_empty());
    }

    #[test]
    fn test_quick_action_enter_fills_input() {
        let mut app = test_app();
        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, FocusPane::QuickActions);

        handle_event(&mut app, key(KeyCode::Char('j')));
        handle_event(&mut app, key(KeyCode::Char('j')));
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.session.input(), "Generate Terraform code for my infrastructure");
        assert_eq!(app.session.len(), 1);
        assert_eq!(app.focus, FocusPane::Input);
    }

    #[test]
    fn test_quick_action_number_key() {
        let mut app = test_app();
        app.focus = FocusPane::QuickActions;
        handle_event(&mut app, key(KeyCode::Char('4')));
        assert_eq!(app.session.input(), "Scale my database cluster");

        app.session.clear_input();
        app.focus = FocusPane::QuickActions;
        handle_event(&mut app, key(KeyCode::Char('9')));
        assert!(app.session.input().is_empty());
    }

    #[test]
    fn test_template_enter_notifies() {
        let mut app = test_app();
        app.focus = FocusPane::Templates;
        handle_event(&mut app, key(KeyCode::Down));
        handle_event(&mut app, key(KeyCode::Enter));

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(
            toast.notification.description,
            "Serverless API template will be used for your deployment"
        );
    }

    #[test]
    fn test_letters_type_in_input_but_act_elsewhere() {
        let mut app = test_app();
        type_text(&mut app, "hq");
        assert_eq!(app.session.input(), "hq");
        assert!(!app.should_quit);
        assert!(app.toast.is_none());

        handle_event(&mut app, key(KeyCode::Esc));
        assert_eq!(app.focus, FocusPane::Chat);
        handle_event(&mut app, key(KeyCode::Char('h')));
        assert_eq!(app.toast.as_ref().unwrap().notification.title, "Chat history");
        handle_event(&mut app, key(KeyCode::Char('t')));
        assert_eq!(app.theme, Theme::Light);
        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_input() {
        let mut app = test_app();
        handle_event(&mut app, key_with(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_click_on_template_row() {
        let mut app = test_app();
        app.templates_area = Some(Rect::new(60, 10, 30, 11));

        // Border at y=10, first template rows 11..14, second 14..17
        handle_event(
            &mut app,
            AppEvent::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 65,
                row: 15,
                modifiers: KeyModifiers::NONE,
            }),
        );

        assert_eq!(app.focus, FocusPane::Templates);
        assert_eq!(app.template_state.selected(), Some(1));
        assert_eq!(app.toast.as_ref().unwrap().notification.title, "Template selected");
    }

    #[test]
    fn test_list_index_at_ignores_borders() {
        let area = Rect::new(0, 0, 10, 6);
        assert_eq!(list_index_at(0, area, 0, 1), None);
        assert_eq!(list_index_at(1, area, 0, 1), Some(0));
        assert_eq!(list_index_at(4, area, 2, 1), Some(5));
        assert_eq!(list_index_at(5, area, 0, 1), None);
    }

    #[test]
    fn test_resize_keeps_manual_scroll() {
        let mut app = test_app();
        app.chat_total_lines = 40;
        app.chat_height = 10;
        app.scroll_chat_up(5);
        let scroll = app.chat_scroll;

        handle_event(&mut app, AppEvent::Resize);

        assert!(!app.follow_chat);
        assert_eq!(app.chat_scroll, scroll);
    }

    #[test]
    fn test_paste_inserts_one_line_at_cursor() {
        let mut app = test_app();
        type_text(&mut app, "Deploy ");
        handle_event(&mut app, AppEvent::Paste("a web\r\napp\nnow".to_string()));

        assert_eq!(app.session.input(), "Deploy a web app now");
        assert_eq!(app.input_cursor, 20);
        assert!(!app.is_composing());
        assert_eq!(app.session.len(), 1);
    }

    #[test]
    fn test_paste_outside_input_is_ignored() {
        let mut app = test_app();
        app.focus = FocusPane::Chat;
        handle_event(&mut app, AppEvent::Paste("quit\n".to_string()));

        assert!(app.session.input().is_empty());
        assert!(!app.should_quit);
    }
}
