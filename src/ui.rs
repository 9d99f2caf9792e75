use std::collections::HashSet;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::Session;
use crate::arcade::{Arcade, MENU as ARCADE_MENU};
use crate::constants::ui::{MIN_HEIGHT, MIN_WIDTH};
use crate::contact::{ContactForm, Field, Focus, FormStatus};
use crate::matrix::Glyph;
use crate::snake::{Cell, SnakeGame};
use crate::theme::ColorScheme;
use crate::types::{ArcadeMode, View};

const BANNER: [&str; 7] = [
    "╔═══════════════════════════════════════╗",
    "║                                       ║",
    "║         P C S T Y L E . D E V         ║",
    "║                                       ║",
    "║       Remote Terminal Interface       ║",
    "║                                       ║",
    "╚═══════════════════════════════════════╝",
];

const ARCADE_BANNER: [&str; 4] = [
    "╔═ ARC4D3 ═══════════════╗",
    "║  █░█ █▀█ █▄░█ ▄▀█ ▄▀█  ║",
    "║  ▀▄▀ █▀▀ █░▀█ █▀█ █▀█  ║",
    "╚════════════════════════╝",
];

const GOODBYE: [&str; 6] = [
    "  _____ _                 _                       _ ",
    " |_   _| |__   __ _ _ __ | | __  _   _  ___  _  _| |",
    "   | | | '_ \\ / _' | '_ \\| |/ / | | | |/ _ \\| || | |",
    "   | | | | | | (_| | | | |   <  | |_| | (_) | || |_|",
    "   |_| |_| |_|\\__,_|_| |_|_|\\_\\  \\__, |\\___/ \\_,_(_)",
    "                                 |___/              ",
];

/// Plain-text farewell written after the session's screen is torn down.
pub fn goodbye_banner() -> String {
    let mut out = String::new();
    for line in GOODBYE {
        out.push_str(line.trim_end());
        out.push_str("\r\n");
    }
    out.push_str("\r\nThanks for visiting pcstyle.dev!\r\n");
    out
}

// ===============================
// Top-level draw
// ===============================
pub fn draw(f: &mut Frame, session: &Session, colors: &ColorScheme) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    // No geometry from the client yet.
    if session.size() == (0, 0) {
        notice(f, area, "still initializing...", colors);
        return;
    }
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        notice(f, area, "terminal too small", colors);
        return;
    }

    match session.view() {
        View::Home => home(f, area, session, colors),
        View::Contact => contact(f, area, session.contact(), colors),
        View::About => about(f, area, colors),
        View::SecretsLog => secrets_log(f, area, session, colors),
        View::Help => help(f, area, colors),
        View::Arcade(ArcadeMode::Menu) => arcade_menu(f, area, session.arcade(), colors),
        View::Arcade(ArcadeMode::Snake) => snake(f, area, session.arcade(), colors),
        View::Arcade(ArcadeMode::Screensaver) => rain(f, area, session.arcade(), colors),
        View::Exit => goodbye(f, area, colors),
    }
}

fn notice(f: &mut Frame, area: Rect, text: &str, colors: &ColorScheme) {
    let y = area.y + area.height / 2;
    let line = Rect { x: area.x, y, width: area.width, height: 1 };
    let p = Paragraph::new(Span::styled(text, colors.help())).alignment(Alignment::Center);
    f.render_widget(p, line);
}

fn boxed<'a>(title: &'a str, colors: &ColorScheme) -> Block<'a> {
    Block::default()
        .title(Span::styled(format!(" {title} "), colors.title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors.border))
}

fn menu_line<'a>(title: String, description: &'a str, selected: bool, colors: &ColorScheme) -> Line<'a> {
    let (arrow, style) = if selected {
        (Span::styled("→ ", colors.arrow()), colors.item_selected())
    } else {
        (Span::raw("  "), colors.item())
    };
    Line::from(vec![
        arrow,
        Span::styled(title, style),
        Span::styled(" - ", colors.help()),
        Span::styled(description, colors.help()),
    ])
}

fn status_line<'a>(text: Option<&'a str>, colors: &ColorScheme) -> Line<'a> {
    Line::from(Span::styled(text.unwrap_or(""), colors.help()))
}

// ===============================
// Home
// ===============================
fn home(f: &mut Frame, area: Rect, session: &Session, colors: &ColorScheme) {
    let home = session.home();
    let mut lines: Vec<Line> = BANNER
        .iter()
        .map(|l| Line::from(Span::styled(*l, colors.title())))
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Welcome to the pcstyle.dev terminal", colors.title())));
    lines.push(Line::default());

    for (i, item) in home.items().enumerate() {
        let title = if item.hidden {
            format!("{} *", item.title)
        } else {
            item.title.to_string()
        };
        lines.push(menu_line(title, item.description, i == home.cursor(), colors));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Use ↑/↓ or j/k to navigate • Enter to select • Press q to quit",
        colors.help(),
    )));
    if home.hidden_visible() {
        lines.push(Line::from(Span::styled(
            "bonus: try typing 'snake' or 'games' sometime.",
            colors.help(),
        )));
    }
    lines.push(status_line(home.status(), colors));

    f.render_widget(Paragraph::new(lines), inset(area));
}

fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y,
        width: area.width.saturating_sub(2),
        height: area.height,
    }
}

// ===============================
// Contact
// ===============================
fn contact(f: &mut Frame, area: Rect, form: &ContactForm, colors: &ColorScheme) {
    let block = boxed("Contact", colors);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(inner);

    let mut lines: Vec<Line> = Vec::new();
    for field in Field::ALL {
        let focused = form.focus() == Focus::Field(field);
        let marker = if focused {
            Span::styled("→ ", colors.arrow())
        } else {
            Span::raw("  ")
        };
        lines.push(Line::from(vec![marker, Span::styled(field.label(), colors.label())]));

        let value = form.value(field);
        let mut spans = vec![Span::raw("  ")];
        if value.is_empty() {
            spans.push(Span::styled(field.placeholder(), colors.help()));
        } else {
            spans.push(Span::styled(value, colors.item()));
        }
        if focused {
            spans.push(Span::styled("█", colors.arrow()));
        }
        lines.push(Line::from(spans));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);

    let button = |label: &'static str, focus: Focus| {
        if form.focus() == focus {
            Span::styled(label, colors.item_selected().add_modifier(Modifier::REVERSED))
        } else {
            Span::styled(label, colors.item())
        }
    };
    let status = match form.status() {
        FormStatus::Editing => Line::from(Span::styled(
            "Tab/↓ next • Shift-Tab/↑ previous • Enter on Submit to send • Esc back",
            colors.help(),
        )),
        FormStatus::Submitting { .. } => Line::from(Span::styled("Sending...", colors.help())),
        FormStatus::Submitted(outcome) if outcome.success => {
            Line::from(Span::styled(format!("✓ {}", outcome.message), colors.ok()))
        }
        FormStatus::Submitted(outcome) => {
            Line::from(Span::styled(format!("✗ {}", outcome.message), colors.err()))
        }
    };
    let footer = vec![
        Line::from(vec![
            Span::raw("  "),
            button("[ Submit ]", Focus::Submit),
            Span::raw("  "),
            button("[ Back ]", Focus::Back),
        ]),
        Line::default(),
        status,
    ];
    f.render_widget(Paragraph::new(footer), chunks[1]);
}

// ===============================
// Static pages
// ===============================
fn section<'a>(lines: &mut Vec<Line<'a>>, label: &'a str, body: &[&'a str], colors: &ColorScheme) {
    lines.push(Line::from(Span::styled(label, colors.label())));
    for l in body {
        lines.push(Line::from(Span::styled(*l, colors.item())));
    }
    lines.push(Line::default());
}

fn about(f: &mut Frame, area: Rect, colors: &ColorScheme) {
    let mut lines = vec![
        Line::from(Span::styled("Adam Krupa (@pcstyle)", colors.item_selected())),
        Line::default(),
    ];
    section(
        &mut lines,
        "WHAT",
        &[
            "Blending AI, design and creative coding.",
            "Neo-brutalist design with interactive and generative tech.",
        ],
        colors,
    );
    section(
        &mut lines,
        "PROJECTS",
        &[
            "• Clock Gallery - animated art (clock.pcstyle.dev)",
            "• AimDrift - precision aim trainer (driftfield.pcstyle.dev)",
            "• PixelForge - AI image editor (pixlab.pcstyle.dev)",
        ],
        colors,
    );
    section(
        &mut lines,
        "CONNECT",
        &["GitHub: github.com/pcstyle", "Web: pcstyle.dev"],
        colors,
    );
    lines.push(Line::from(Span::styled("Press Enter or Esc to go back", colors.help())));

    let p = Paragraph::new(lines)
        .block(boxed("About pcstyle.dev", colors))
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn help(f: &mut Frame, area: Rect, colors: &ColorScheme) {
    let mut lines = Vec::new();
    section(
        &mut lines,
        "HIDDEN COMMANDS",
        &[
            "• type 'snake' or 'games' - open the arcade",
            "• type 'matrix' - matrix rain",
            "• type 'konami' - toggle hidden menu",
            "• type 'help' - this page",
        ],
        colors,
    );
    section(&mut lines, "KONAMI CODE", &["↑ ↑ ↓ ↓ ← → ← → B A"], colors);
    section(
        &mut lines,
        "SNAKE",
        &["arrows / wasd / hjkl steer", "space pause • r restart • esc menu"],
        colors,
    );
    lines.push(Line::from(Span::styled("Press Esc/Q/Enter to go back", colors.help())));

    let p = Paragraph::new(lines).block(boxed("EASTER EGGS & SECRETS", colors));
    f.render_widget(p, area);
}

fn secrets_log(f: &mut Frame, area: Rect, session: &Session, colors: &ColorScheme) {
    let log = session.secrets_log();
    let entry = log.entry();
    let mut lines = vec![
        Line::from(Span::styled(
            format!("log {:02} :: {}", log.index() + 1, entry.title),
            colors.title(),
        )),
        Line::default(),
    ];
    lines.extend(entry.body.iter().map(|l| Line::from(Span::styled(*l, colors.item()))));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "←/→ (hjkl too) change entry • enter skip • esc back",
        colors.help(),
    )));
    lines.push(status_line(log.flash_text(), colors));

    let p = Paragraph::new(lines).block(boxed("???", colors)).wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

fn goodbye(f: &mut Frame, area: Rect, colors: &ColorScheme) {
    let mut lines: Vec<Line> = GOODBYE
        .iter()
        .map(|l| Line::from(Span::styled(*l, colors.title())))
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Thanks for visiting pcstyle.dev!", colors.item())));
    f.render_widget(Paragraph::new(lines), inset(area));
}

// ===============================
// Arcade
// ===============================
fn arcade_menu(f: &mut Frame, area: Rect, arcade: &Arcade, colors: &ColorScheme) {
    let mut lines: Vec<Line> = ARCADE_BANNER
        .iter()
        .map(|l| Line::from(Span::styled(*l, colors.title())))
        .collect();
    lines.push(Line::from(Span::styled("mini arcade hub", colors.item())));
    lines.push(Line::default());

    for (i, entry) in ARCADE_MENU.iter().enumerate() {
        lines.push(menu_line(entry.title.to_string(), entry.description, i == arcade.cursor(), colors));
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        "Enter to launch • esc/q to go back",
        colors.help(),
    )));
    lines.push(status_line(Some(arcade.status()), colors));

    f.render_widget(Paragraph::new(lines).block(boxed("ARCADE", colors)), area);
}

fn snake(f: &mut Frame, area: Rect, arcade: &Arcade, colors: &ColorScheme) {
    let Some(game) = arcade.snake() else {
        notice(f, area, "snake not booted", colors);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled("SNAKE.exe // nostalgia food", colors.title())),
        Line::default(),
    ];
    lines.extend(board_lines(game, colors));
    lines.push(Line::default());
    let mut score = format!("score: {}  • arrows / wasd • space pause • esc/q menu • r respawn", game.score());
    if arcade.is_paused() {
        score.push_str("  [PAUSED]");
    }
    lines.push(Line::from(Span::styled(score, colors.help())));
    if !game.is_alive() {
        lines.push(Line::from(Span::styled("you died. r = retry, esc = leave", colors.err())));
    }
    lines.push(status_line(Some(arcade.status()), colors));

    f.render_widget(Paragraph::new(lines), inset(area));
}

fn board_lines<'a>(game: &SnakeGame, colors: &ColorScheme) -> Vec<Line<'a>> {
    let w = game.width().max(0) as usize;
    let border = Style::default().fg(colors.border);
    let body: HashSet<Cell> = game.body().iter().copied().collect();
    let head = game.head();
    let food = game.food();

    let mut lines = Vec::with_capacity(game.height().max(0) as usize + 2);
    lines.push(Line::from(Span::styled(format!("╔{}╗", "═".repeat(w)), border)));
    for y in 0..game.height() {
        let mut spans = vec![Span::styled("║", border)];
        for x in 0..game.width() {
            let c = Cell::new(x, y);
            spans.push(if c == head {
                Span::styled("■", Style::default().fg(colors.snake_head).add_modifier(Modifier::BOLD))
            } else if c == food {
                Span::styled("●", Style::default().fg(colors.food))
            } else if body.contains(&c) {
                Span::styled("░", Style::default().fg(colors.snake_head))
            } else {
                Span::raw(" ")
            });
        }
        spans.push(Span::styled("║", border));
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled(format!("╚{}╝", "═".repeat(w)), border)));
    lines
}

fn rain(f: &mut Frame, area: Rect, arcade: &Arcade, colors: &ColorScheme) {
    let rain = arcade.rain();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let mut title = vec![
        Span::styled("MATRIX RAIN ", colors.title()),
        Span::styled("(esc/enter: menu • q: home)", colors.help()),
    ];
    if let Some(left) = rain.frames_left() {
        title.push(Span::styled(format!("  {:.1}s left", left as f32 / 20.0), colors.help()));
    }
    f.render_widget(Paragraph::new(Line::from(title)), chunks[0]);

    if !rain.is_ready() {
        notice(f, chunks[1], "resizing...", colors);
        return;
    }

    let head = Style::default().fg(colors.text).add_modifier(Modifier::BOLD);
    let trail = Style::default().fg(colors.success);
    let fade = Style::default().fg(colors.muted);
    let lines: Vec<Line> = rain
        .grid()
        .into_iter()
        .take(chunks[1].height as usize)
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|g| match g {
                        Glyph::Empty => Span::raw(" "),
                        Glyph::Head(c) => Span::styled(c.to_string(), head),
                        Glyph::Trail(c) => Span::styled(c.to_string(), trail),
                        Glyph::Fade => Span::styled("·", fade),
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines), chunks[1]);
}
