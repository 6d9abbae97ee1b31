use std::path::PathBuf;
use std::time::{Duration, Instant};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tracing::{info, warn};
use cloudai_core::{
    ChatSession, Config, Notification, PendingReply, ReplyTask, Theme, SUGGESTED_QUERIES,
    TEMPLATES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Input,
    Chat,
    QuickActions,
    Templates,
}

impl FocusPane {
    pub fn next(self) -> Self {
        match self {
            FocusPane::Input => FocusPane::Chat,
            FocusPane::Chat => FocusPane::QuickActions,
            FocusPane::QuickActions => FocusPane::Templates,
            FocusPane::Templates => FocusPane::Input,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusPane::Input => FocusPane::Templates,
            FocusPane::Chat => FocusPane::Input,
            FocusPane::QuickActions => FocusPane::Chat,
            FocusPane::Templates => FocusPane::QuickActions,
        }
    }
}

/// A notification currently on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub focus: FocusPane,
    pub session: ChatSession,
    pub input_cursor: usize, // cursor position in the input, in chars

    // Pending reply
    pub reply_task: Option<ReplyTask>,
    pub reply_delay: Duration,

    // Chat view
    pub chat_scroll: u16,
    pub follow_chat: bool, // stick to the newest message
    pub chat_total_lines: u16,
    pub chat_height: u16,

    // Picklists
    pub query_state: ListState,
    pub template_state: ListState,

    // Notifications
    pub toast: Option<Toast>,
    pub toast_duration: Duration,

    // Appearance
    pub theme: Theme,
    pub config_path: Option<PathBuf>,
    pub animation_frame: u8, // 0-2 for the typing indicator

    // Panel areas for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,
    pub input_area: Option<Rect>,
    pub queries_area: Option<Rect>,
    pub templates_area: Option<Rect>,
}

impl App {
    /// `config_path` is where theme changes are persisted; `None` keeps them
    /// in memory only.
    pub fn new(config: &Config, config_path: Option<PathBuf>) -> Self {
        let mut query_state = ListState::default();
        query_state.select(Some(0));
        let mut template_state = ListState::default();
        template_state.select(Some(0));

        Self {
            should_quit: false,
            focus: FocusPane::Input,
            session: ChatSession::new(),
            input_cursor: 0,

            reply_task: None,
            reply_delay: config.reply_delay(),

            chat_scroll: 0,
            follow_chat: true,
            chat_total_lines: 0,
            chat_height: 0,

            query_state,
            template_state,

            toast: None,
            toast_duration: config.toast_duration(),

            theme: config.theme(),
            config_path,
            animation_frame: 0,

            chat_area: None,
            input_area: None,
            queries_area: None,
            templates_area: None,
        }
    }

    /// Send the input buffer. Ignored when blank or while a reply is pending.
    pub fn submit(&mut self) {
        if let Some(pending) = self.session.submit_input() {
            info!(chars = pending.utterance().chars().count(), "message submitted");
            self.input_cursor = 0;
            self.animation_frame = 0;
            self.reply_task = Some(ReplyTask::spawn(pending, self.reply_delay));
            self.scroll_chat_to_bottom();
        }
    }

    /// Called with the outcome of the reply task; `None` means it was lost.
    pub fn finish_reply(&mut self, pending: Option<PendingReply>) {
        self.reply_task = None;
        match pending {
            Some(pending) => {
                self.session.complete_reply(pending);
                info!(messages = self.session.len(), "reply delivered");
            }
            None => {
                warn!("reply task lost, unlocking input");
                self.session.abandon_reply();
            }
        }
        self.scroll_chat_to_bottom();
    }

    pub fn is_composing(&self) -> bool {
        self.session.is_composing()
    }

    // Picklist actions
    pub fn select_query(&mut self, idx: usize) {
        if let Some(query) = SUGGESTED_QUERIES.get(idx) {
            self.query_state.select(Some(idx));
            self.session.set_input(query.text);
            self.input_cursor = query.text.chars().count();
            self.focus = FocusPane::Input;
            self.notify(Notification::suggestion_selected(query));
        }
    }

    pub fn select_template(&mut self, idx: usize) {
        if let Some(template) = TEMPLATES.get(idx) {
            self.template_state.select(Some(idx));
            self.notify(Notification::template_selected(template));
        }
    }

    pub fn view_history(&mut self) {
        self.notify(Notification::history_requested());
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Some(path) = &self.config_path {
            if let Err(e) = Config::save_theme(path, self.theme) {
                warn!("failed to save theme to {}: {:#}", path.display(), e);
            }
        }
        self.notify(Notification::theme_changed(self.theme));
    }

    /// Show a toast, replacing any toast already on screen.
    pub fn notify(&mut self, notification: Notification) {
        info!(title = %notification.title, "{}", notification.description);
        self.toast = Some(Toast {
            notification,
            shown_at: Instant::now(),
        });
    }

    /// Tick animation frame and expire toasts (called by Tick event)
    pub fn tick(&mut self, now: Instant) {
        if self.is_composing() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        let expired = self
            .toast
            .as_ref()
            .is_some_and(|t| now.saturating_duration_since(t.shown_at) >= self.toast_duration);
        if expired {
            self.toast = None;
        }
    }

    // Picklist navigation
    pub fn query_nav_down(&mut self) {
        let len = SUGGESTED_QUERIES.len();
        let i = self.query_state.selected().unwrap_or(0);
        self.query_state.select(Some((i + 1).min(len - 1)));
    }

    pub fn query_nav_up(&mut self) {
        let i = self.query_state.selected().unwrap_or(0);
        self.query_state.select(Some(i.saturating_sub(1)));
    }

    pub fn template_nav_down(&mut self) {
        let len = TEMPLATES.len();
        let i = self.template_state.selected().unwrap_or(0);
        self.template_state.select(Some((i + 1).min(len - 1)));
    }

    pub fn template_nav_up(&mut self) {
        let i = self.template_state.selected().unwrap_or(0);
        self.template_state.select(Some(i.saturating_sub(1)));
    }

    // Chat scrolling
    pub fn max_chat_scroll(&self) -> u16 {
        self.chat_total_lines.saturating_sub(self.chat_height)
    }

    /// Follow the newest message; the exact offset is resolved at render time
    /// once the wrapped height is known.
    pub fn scroll_chat_to_bottom(&mut self) {
        self.follow_chat = true;
    }

    pub fn scroll_chat_up(&mut self, lines: u16) {
        if self.follow_chat {
            self.chat_scroll = self.max_chat_scroll();
        }
        self.follow_chat = false;
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_chat_down(&mut self, lines: u16) {
        let max_scroll = self.max_chat_scroll();
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(max_scroll);
        if self.chat_scroll >= max_scroll {
            self.follow_chat = true;
        }
    }

    pub fn scroll_chat_to_top(&mut self) {
        self.follow_chat = false;
        self.chat_scroll = 0;
    }
}

/// Resolves when the pending reply is due; never resolves when idle.
pub async fn wait_for_reply(task: &mut Option<ReplyTask>) -> Option<PendingReply> {
    match task {
        Some(task) => task.wait().await,
        None => std::future::pending().await,
    }
}
