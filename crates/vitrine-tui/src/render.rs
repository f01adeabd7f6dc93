//! Pure view/render functions for the widget TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! frame, and never mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;
use vitrine_types::Product;

use crate::common::text::truncate_with_ellipsis;
use crate::state::{AppState, Phase};

/// Header height (title + subtitle).
const HEADER_HEIGHT: u16 = 2;

/// Height of the bordered input field.
const INPUT_HEIGHT: u16 = 3;

/// Height of the error banner when visible.
const BANNER_HEIGHT: u16 = 3;

/// Height of the status line below the main view.
const STATUS_HEIGHT: u16 = 1;

/// Spinner frames for the loading/adding indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Ticks per spinner frame.
const SPINNER_SPEED_DIVISOR: usize = 2;

/// The four mutually exclusive main views, projected from state.
///
/// The projection makes the render-state machine explicit: exactly one of
/// these exists for any state, and the error banner is additive on top.
#[derive(Debug, PartialEq, Eq)]
pub enum WidgetView<'a> {
    Loading,
    AwaitingAuth,
    Empty,
    Listing(&'a [Product]),
}

impl<'a> WidgetView<'a> {
    pub fn of(state: &'a AppState) -> Self {
        match state.phase {
            Phase::Loading => WidgetView::Loading,
            Phase::AwaitingAuth => WidgetView::AwaitingAuth,
            Phase::Ready if state.products.is_empty() => WidgetView::Empty,
            Phase::Ready => WidgetView::Listing(&state.products),
        }
    }
}

/// Renders the entire widget to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let banner_height = if state.error.is_some() {
        BANNER_HEIGHT
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(banner_height),
            Constraint::Min(1),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    render_header(frame, chunks[0]);
    render_input(state, frame, chunks[1]);
    if let Some(error) = &state.error {
        render_banner(error, frame, chunks[2]);
    }
    render_main(state, frame, chunks[3]);
    render_status_line(state, frame, chunks[4]);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Gerenciar Produtos",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Adicione e visualize produtos da sua loja.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_input(state: &AppState, frame: &mut Frame, area: Rect) {
    let input = &state.input;

    let (content, style) = if input.value.is_empty() {
        let placeholder = if state.authenticated {
            "Nome do produto"
        } else {
            "Aguardando autenticação..."
        };
        (placeholder, Style::default().fg(Color::DarkGray))
    } else {
        (input.value.as_str(), Style::default())
    };

    let border_style = if input.adding {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Blue)
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    frame.render_widget(Paragraph::new(content).style(style).block(block), area);

    // Cursor inside the field, except while the insert is in flight.
    if !input.adding {
        let prefix: String = input.value.chars().take(input.cursor).collect();
        let x = area.x + 1 + prefix.width() as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_banner(error: &str, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let banner = Paragraph::new(Span::styled(error, Style::default().fg(Color::Red)))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(banner, area);
}

fn render_main(state: &AppState, frame: &mut Frame, area: Rect) {
    match WidgetView::of(state) {
        WidgetView::Loading => render_loading(state, frame, area),
        WidgetView::AwaitingAuth => render_awaiting_auth(frame, area),
        WidgetView::Empty => render_empty(frame, area),
        WidgetView::Listing(products) => render_listing(products, frame, area),
    }
}

fn spinner(state: &AppState) -> &'static str {
    let index = (state.spinner_frame / SPINNER_SPEED_DIVISOR) % SPINNER_FRAMES.len();
    SPINNER_FRAMES[index]
}

fn render_loading(state: &AppState, frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(spinner(state), Style::default().fg(Color::Blue)),
        Span::raw(" "),
        Span::styled("Carregando produtos...", Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn render_awaiting_auth(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(Span::styled(
            " Aguardando Autenticação ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    let copy = Paragraph::new(
        "Este aplicativo está aguardando as credenciais do aplicativo principal \
         para carregar os dados.",
    )
    .style(Style::default().fg(Color::Yellow))
    .wrap(Wrap { trim: true })
    .block(block);
    frame.render_widget(copy, area);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Nenhum produto encontrado ",
            Style::default().fg(Color::Gray),
        ));
    let copy = Paragraph::new("Comece adicionando um novo produto acima.")
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(copy, area);
}

fn render_listing(products: &[Product], frame: &mut Frame, area: Rect) {
    let name_width = (area.width.saturating_sub(16)) as usize;

    let lines: Vec<Line<'static>> = products
        .iter()
        .map(|product| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    truncate_with_ellipsis(&product.name, name_width.max(1)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    product.created_date(),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let title = format!(" Produtos ({}) ", products.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_line(state: &AppState, frame: &mut Frame, area: Rect) {
    let spans: Vec<Span> = if state.input.adding {
        vec![
            Span::styled(spinner(state), Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled("Adicionando...", Style::default().fg(Color::Yellow)),
        ]
    } else {
        vec![
            Span::styled("Enter", Style::default().fg(Color::DarkGray)),
            Span::raw(" adicionar  "),
            Span::styled("Ctrl+R", Style::default().fg(Color::DarkGray)),
            Span::raw(" recarregar  "),
            Span::styled("Ctrl+C", Style::default().fg(Color::DarkGray)),
            Span::raw(" sair"),
        ]
    };
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Left),
        area,
    );
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn product(id: i64, name: &str, created_at: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            created_at: created_at.parse().unwrap(),
        }
    }

    fn draw(state: &AppState) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(state, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn view_projection_is_exhaustive() {
        let mut state = AppState::new();
        assert_eq!(WidgetView::of(&state), WidgetView::Loading);

        state.phase = Phase::AwaitingAuth;
        assert_eq!(WidgetView::of(&state), WidgetView::AwaitingAuth);

        state.phase = Phase::Ready;
        assert_eq!(WidgetView::of(&state), WidgetView::Empty);

        state.products = vec![product(1, "Chair", "2024-01-02T00:00:00Z")];
        assert!(matches!(WidgetView::of(&state), WidgetView::Listing(_)));
    }

    #[test]
    fn loading_view_shows_spinner_copy() {
        let state = AppState::new();
        let text = draw(&state);
        assert!(text.contains("Carregando produtos..."));
        assert!(text.contains("Gerenciar Produtos"));
    }

    #[test]
    fn awaiting_auth_view_shows_prompt() {
        let mut state = AppState::new();
        state.phase = Phase::AwaitingAuth;
        let text = draw(&state);
        assert!(text.contains("Aguardando Autenticação"));
        assert!(text.contains("Aguardando autenticação..."));
    }

    #[test]
    fn listing_shows_names_and_dates_newest_first() {
        let mut state = AppState::new();
        state.phase = Phase::Ready;
        state.authenticated = true;
        state.products = vec![
            product(1, "Chair", "2024-01-02T00:00:00Z"),
            product(2, "Desk", "2024-01-01T00:00:00Z"),
        ];
        let text = draw(&state);
        let chair = text.find("Chair").unwrap();
        let desk = text.find("Desk").unwrap();
        assert!(chair < desk);
        assert!(text.contains("02/01/2024"));
        assert!(text.contains("01/01/2024"));
    }

    #[test]
    fn error_banner_renders_alongside_the_main_view() {
        let mut state = AppState::new();
        state.phase = Phase::Ready;
        state.error = Some("Falha ao carregar produtos: permission denied".to_string());
        let text = draw(&state);
        assert!(text.contains("Falha ao carregar produtos"));
        assert!(text.contains("Nenhum produto encontrado"));
    }
}
