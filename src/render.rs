//! Terminal renderer
//!
//! Redraws from the dispatcher's latest snapshot at a cosmetic cadence that
//! is independent of ticking. It never touches the session state itself.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use limber_core::{SessionHandle, SessionSnapshot};

use crate::error::AppError;
use crate::input::RenderHint;

const INSTRUCTIONS: [&str; 3] = [
    "Press f/b to go to next/previous stretches",
    "Press p to toggle pause, m to toggle mute",
    "Press ESC to exit",
];

// ─────────────────────────────────────────────────────────────────────────────
// View Model
// ─────────────────────────────────────────────────────────────────────────────

/// Everything the screen shows, derived from one snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenText {
    pub title: String,
    pub headline: String,
    pub remaining: String,
    pub flags: Vec<&'static str>,
    pub progress: f64,
}

pub fn view_model(snapshot: &SessionSnapshot) -> ScreenText {
    let total = snapshot.activities.len();
    let position = (snapshot.current_index + 1).min(total);

    let headline = if snapshot.is_complete() {
        "All done!".to_string()
    } else if !snapshot.started && snapshot.is_paused && snapshot.current_index == 0 {
        // Only until the user navigates; then the chosen activity is shown
        "Press p to start".to_string()
    } else {
        snapshot.current_activity().unwrap_or_default().to_string()
    };

    let mut flags = Vec::new();
    if snapshot.is_paused {
        flags.push("Paused");
    }
    if snapshot.is_muted {
        flags.push("Muted");
    }

    ScreenText {
        title: format!(" Limber {position}/{total} "),
        headline,
        remaining: format!("{} s", snapshot.remaining_ticks()),
        flags,
        progress: snapshot.progress(),
    }
}

pub fn draw(frame: &mut Frame<'_>, view: &ScreenText) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(frame.area());

    let main = Paragraph::new(vec![
        Line::styled(
            view.headline.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(view.remaining.clone()),
    ])
    .block(Block::default().borders(Borders::ALL).title(view.title.clone()));
    frame.render_widget(main, chunks[0]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Session "))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(view.progress);
    frame.render_widget(gauge, chunks[1]);

    let flags = Paragraph::new(view.flags.join("  "))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    frame.render_widget(flags, chunks[2]);

    let help: Vec<Line> = INSTRUCTIONS.iter().map(|line| Line::from(*line)).collect();
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[3],
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Terminal Setup
// ─────────────────────────────────────────────────────────────────────────────

/// Crossterm terminal that restores the screen when dropped
pub struct Tui {
    pub terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn init() -> Result<Self, AppError> {
        enable_raw_mode().map_err(AppError::TerminalSetup)?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(AppError::TerminalSetup(err));
        }
        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                restore();
                return Err(AppError::TerminalSetup(err));
            }
        };
        Ok(Self { terminal })
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        restore();
    }
}

fn restore() {
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(error = %err, "Failed to disable raw mode");
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        tracing::warn!(error = %err, "Failed to leave alternate screen");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Render Loop
// ─────────────────────────────────────────────────────────────────────────────

pub struct Renderer {
    session: SessionHandle,
    hint_rx: mpsc::UnboundedReceiver<RenderHint>,
    interval: Duration,
}

impl Renderer {
    pub fn new(
        session: SessionHandle,
        hint_rx: mpsc::UnboundedReceiver<RenderHint>,
        interval: Duration,
    ) -> Self {
        Self {
            session,
            hint_rx,
            interval,
        }
    }

    /// Draw until the dispatcher shuts down
    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut cadence = tokio::time::interval(self.interval);
        cadence.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cadence.tick() => {}
                Some(hint) = self.hint_rx.recv() => {
                    tracing::debug!(?hint, "Terminal resized");
                    terminal.autoresize().map_err(AppError::Draw)?;
                    terminal.clear().map_err(AppError::Draw)?;
                }
            }

            if !self.session.is_live() {
                break;
            }
            let view = view_model(&self.session.snapshot());
            terminal
                .draw(|frame| draw(frame, &view))
                .map_err(AppError::Draw)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limber_core::{
        Command, Dispatcher, SessionState, create_command_channel, create_cue_channel,
    };
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn snapshot() -> SessionSnapshot {
        SessionSnapshot {
            activities: Arc::from(vec!["Neck Left".to_string(), "Neck Up".to_string()]),
            current_index: 0,
            elapsed_ticks: 0,
            ticks_per_activity: 30,
            is_paused: true,
            is_muted: false,
            started: false,
            completed: false,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn before_start_prompts_for_pause_key() {
        let view = view_model(&snapshot());
        assert_eq!(view.headline, "Press p to start");
        assert_eq!(view.title, " Limber 1/2 ");
        assert_eq!(view.remaining, "30 s");
        assert_eq!(view.flags, vec!["Paused"]);
    }

    #[test]
    fn navigating_before_start_shows_chosen_activity() {
        let mut s = snapshot();
        s.current_index = 1;

        let view = view_model(&s);
        assert_eq!(view.headline, "Neck Up");
        assert_eq!(view.title, " Limber 2/2 ");
        assert_eq!(view.flags, vec!["Paused"]);
    }

    #[test]
    fn running_shows_activity_and_remaining() {
        let mut s = snapshot();
        s.started = true;
        s.is_paused = false;
        s.is_muted = true;
        s.current_index = 1;
        s.elapsed_ticks = 18;

        let view = view_model(&s);
        assert_eq!(view.headline, "Neck Up");
        assert_eq!(view.remaining, "12 s");
        assert_eq!(view.flags, vec!["Muted"]);
        assert_eq!(view.title, " Limber 2/2 ");
    }

    #[test]
    fn terminal_state_shows_all_done() {
        let mut s = snapshot();
        s.started = true;
        s.current_index = 1;
        s.elapsed_ticks = 30;
        s.completed = true;
        assert_eq!(view_model(&s).headline, "All done!");
    }

    #[test]
    fn draw_puts_headline_and_help_on_screen() {
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).expect("test terminal");
        let view = view_model(&snapshot());
        terminal
            .draw(|frame| draw(frame, &view))
            .expect("draw");

        let text = screen_text(&terminal);
        assert!(text.contains("Press p to start"));
        assert!(text.contains("30 s"));
        assert!(text.contains("Paused"));
        assert!(text.contains("Press ESC to exit"));
    }

    #[tokio::test(start_paused = true)]
    async fn renderer_stops_when_dispatcher_shuts_down() {
        let state = SessionState::new(vec!["A".to_string()], 5).expect("valid session");
        let (cmd_tx, cmd_rx) = create_command_channel();
        let (cue_tx, _cue_rx) = create_cue_channel();
        let (dispatcher, session) = Dispatcher::new(state, cmd_rx, cue_tx);
        let (_hint_tx, hint_rx) = mpsc::unbounded_channel();
        let dispatch = tokio::spawn(dispatcher.run());

        let render = tokio::spawn(async move {
            let mut terminal = Terminal::new(TestBackend::new(60, 14)).expect("test terminal");
            Renderer::new(session, hint_rx, Duration::from_millis(150))
                .run(&mut terminal)
                .await
                .map(|()| screen_text(&terminal))
        });

        cmd_tx.send(Command::TogglePause).await.expect("dispatcher alive");
        cmd_tx.send(Command::TimeStep).await.expect("dispatcher alive");
        tokio::time::sleep(Duration::from_millis(400)).await;
        drop(cmd_tx);

        dispatch.await.expect("dispatcher task");
        let text = render.await.expect("render task").expect("render ok");
        assert!(text.contains("4 s"));
    }
}
