use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

use crate::calc::{CalculationRequest, Measurement, calculate};
use crate::format::format_report;
use crate::numeric::NumericContext;
use crate::units::{DistanceUnit, SpeedOfLightUnit};

/// Shown in the velocity field on startup.
pub const VELOCITY_PLACEHOLDER: &str = "99.999999999999";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Velocity,
    Measurement,
    Magnitude,
    DistanceUnit,
    CUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Calculate,
    Quit,
}

/// Input form state, independent of the terminal.
#[derive(Debug, Clone)]
pub struct Form {
    pub velocity: String,
    pub distance_mode: bool,
    pub magnitude: String,
    pub distance_unit: DistanceUnit,
    pub c_unit: SpeedOfLightUnit,
    pub focus: Field,
    pub output: String,
    pub status: String,
    pub scroll: u16,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            velocity: VELOCITY_PLACEHOLDER.to_string(),
            distance_mode: false,
            magnitude: String::new(),
            distance_unit: DistanceUnit::default(),
            c_unit: SpeedOfLightUnit::default(),
            focus: Field::Velocity,
            output: String::new(),
            status: "Tab: next field  ←/→: change selection  Enter: calculate  Esc: quit".into(),
            scroll: 0,
        }
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    let i = all.iter().position(|&x| x == current).unwrap_or(0);
    let n = all.len();
    all[if forward { (i + 1) % n } else { (i + n - 1) % n }]
}

impl Form {
    /// Focusable fields; the distance unit only exists in distance mode.
    fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Velocity, Field::Measurement, Field::Magnitude];
        if self.distance_mode {
            fields.push(Field::DistanceUnit);
        }
        fields.push(Field::CUnit);
        fields
    }

    pub fn measurement(&self) -> Measurement {
        if self.distance_mode {
            Measurement::Distance(self.distance_unit)
        } else {
            Measurement::Time
        }
    }

    pub fn magnitude_label(&self) -> &'static str {
        if self.distance_mode {
            "Distance to Travel"
        } else {
            "Time on Earth (years)"
        }
    }

    pub fn request(&self) -> CalculationRequest {
        CalculationRequest {
            velocity: self.velocity.clone(),
            measurement: self.measurement(),
            magnitude: self.magnitude.clone(),
            c_unit: self.c_unit,
        }
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Velocity => Some(&mut self.velocity),
            Field::Magnitude => Some(&mut self.magnitude),
            _ => None,
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let fields = self.fields();
        self.focus = cycle(&fields, self.focus, forward);
    }

    fn change_selection(&mut self, forward: bool) {
        match self.focus {
            Field::Measurement => self.distance_mode = !self.distance_mode,
            Field::DistanceUnit => {
                self.distance_unit = cycle(&DistanceUnit::ALL, self.distance_unit, forward)
            }
            Field::CUnit => self.c_unit = cycle(&SpeedOfLightUnit::ALL, self.c_unit, forward),
            Field::Velocity | Field::Magnitude => {}
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Enter => return Action::Calculate,
            KeyCode::Tab | KeyCode::Down => self.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => self.move_focus(false),
            KeyCode::Right => self.change_selection(true),
            KeyCode::Left => self.change_selection(false),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(5),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(5),
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                let on_velocity = self.focus == Field::Velocity;
                if let Some(text) = self.text_mut() {
                    // the placeholder clears on first keystroke
                    if on_velocity && text == VELOCITY_PLACEHOLDER {
                        text.clear();
                    }
                    text.push(c);
                }
            }
            _ => {}
        }
        Action::Continue
    }

    pub fn submit(&mut self, ctx: &NumericContext) {
        self.scroll = 0;
        match calculate(ctx, &self.request()) {
            Ok(result) => {
                self.output = format_report(ctx, &result);
                self.status = "Calculation complete".into();
            }
            Err(err) => {
                self.output = format!("Error: {err}");
                self.status = "Error in calculation".into();
            }
        }
    }
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(style)
}

fn draw(f: &mut Frame, form: &Form) {
    let fields = form.fields();
    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(5));
    constraints.push(Constraint::Length(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(f.area());

    for (i, field) in fields.iter().enumerate() {
        let (title, text) = match field {
            Field::Velocity => ("Velocity (% of c)", form.velocity.clone()),
            Field::Measurement => ("Measurement Type", form.measurement().to_string()),
            Field::Magnitude => (form.magnitude_label(), form.magnitude.clone()),
            Field::DistanceUnit => ("Distance Unit", form.distance_unit.display_name().to_string()),
            Field::CUnit => ("Speed of Light Unit", form.c_unit.to_string()),
        };
        let widget = Paragraph::new(text).block(field_block(title, form.focus == *field));
        f.render_widget(widget, chunks[i]);
    }

    let results = Paragraph::new(form.output.as_str())
        .block(Block::default().borders(Borders::ALL).title("Results"))
        .wrap(Wrap { trim: false })
        .scroll((form.scroll, 0));
    f.render_widget(results, chunks[fields.len()]);
    f.render_widget(Paragraph::new(form.status.as_str()), chunks[fields.len() + 1]);
}

pub fn start(ctx: &NumericContext) -> anyhow::Result<()> {
    // Setup terminal
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    crossterm::terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let outcome = run(&mut terminal, ctx);

    crossterm::terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ctx: &NumericContext,
) -> anyhow::Result<()> {
    let mut form = Form::default();

    loop {
        terminal.draw(|f| draw(f, &form))?;

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match form.handle_key(key.code) {
                    Action::Quit => break,
                    Action::Calculate => form.submit(ctx),
                    Action::Continue => {}
                }
            }
        }
    }

    Ok(())
}
