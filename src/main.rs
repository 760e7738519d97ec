use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use std::io::{self, Stdout, Write};
use unicode_width::UnicodeWidthStr;

use maze_days::{Dir, Game, GameError, Pos, Rules};

const CELL_W: usize = 2;

const INTRO: &[&str] = &[
    "The caravan is gone. You woke up in a cold maze below the earth.",
    "Survive ten days. Find the stairs down each day before your food runs out.",
    "",
    "WASD or arrows to walk, E to descend on the stairs, Q to give up.",
    "",
    "Press Space to begin...",
];

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Enemy,
    Food,
    Exit,
    Guest,
    Cross,
    Wall,
    Floor,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

struct Renderer {
    size: usize,
    last: Vec<Cell>,
    last_hud: String,
    last_status: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    fn new(size: usize) -> Self {
        Self {
            size,
            last: vec![
                Cell {
                    glyph: Glyph::Floor,
                    color: Color::Reset,
                };
                size * size
            ],
            last_hud: String::new(),
            last_status: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let rules = read_rules_overrides();
    let mut game = Game::new(rules, &mut rng).map_err(to_io)?;

    if !show_screen(stdout, INTRO)? {
        return Ok(());
    }

    let mut renderer = Renderer::new(game.maze().size());
    let mut status = String::from("Day 1. The walls hum with silence.");

    loop {
        render(stdout, &game, &status, &mut renderer)?;

        if game.is_game_over() {
            return show_final(stdout, &game, "The food is gone. The maze keeps you.");
        }
        if game.is_victory() {
            let line = if game.has_seen_cross() {
                "Ten days survived. Dawn at last - but the cross still burns in your mind."
            } else {
                "Ten days survived. You climb into the dawn, free."
            };
            return show_final(stdout, &game, line);
        }

        match wait_for_key()? {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
            KeyCode::Char('w') | KeyCode::Up => apply_move(&mut game, Dir::Up, &mut status),
            KeyCode::Char('s') | KeyCode::Down => apply_move(&mut game, Dir::Down, &mut status),
            KeyCode::Char('a') | KeyCode::Left => apply_move(&mut game, Dir::Left, &mut status),
            KeyCode::Char('d') | KeyCode::Right => apply_move(&mut game, Dir::Right, &mut status),
            KeyCode::Char('e') | KeyCode::Char('E') => {
                let complete = game.request_level_complete();
                if !complete.accepted {
                    status = String::from("The stairs are elsewhere.");
                    continue;
                }
                if let Some(plan) = complete.prepared {
                    // The core holds the prepared day until the transition
                    // screen is done; only then do we commit.
                    let lines = [
                        format!(
                            "Day {} survived. +{} points.",
                            game.current_day(),
                            complete.bonus
                        ),
                        String::new(),
                        String::from("Press Space to climb down..."),
                    ];
                    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
                    if !show_screen(stdout, &refs)? {
                        return Ok(());
                    }
                    game.commit_day_advance(&mut rng).map_err(to_io)?;
                    renderer = Renderer::new(game.maze().size());
                    stdout.execute(Clear(ClearType::All))?;
                    status = format!("Day {}. Deeper now.", plan.day);
                }
            }
            _ => {}
        }
    }
}

fn apply_move(game: &mut Game, dir: Dir, status: &mut String) {
    let result = game.submit_move(dir);
    if !result.moved {
        return;
    }
    if result.met_guest {
        *status = String::from("A stranger in rags: \"Watch their steps. They are predictable.\"");
    } else if result.saw_cross {
        *status = String::from("A red cross glows on the floor. The hum fills your head.");
    } else if result.collected_food && result.enemy_contact {
        *status = String::from("You grab the food, but claws find you.");
    } else if result.collected_food {
        *status = String::from("Food! That will keep you going.");
    } else if result.enemy_contact {
        *status = String::from("It caught you. Your pack feels lighter.");
    } else if game.is_exit(result.new_position) {
        *status = String::from("Stairs down. Press E to descend.");
    } else {
        status.clear();
    }
}

fn read_rules_overrides() -> Rules {
    let mut rules = Rules::default();
    if let Some(food) = std::env::var("MAZE_DAYS_START_FOOD")
        .ok()
        .and_then(|v| v.parse::<i32>().ok())
        .filter(|v| *v > 0)
    {
        rules.starting_food = food;
    }
    if let Some(days) = std::env::var("MAZE_DAYS_DAYS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
    {
        rules.days_to_survive = days;
    }
    rules
}

fn wait_for_key() -> io::Result<KeyCode> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press || key.kind == KeyEventKind::Repeat {
                return Ok(key.code);
            }
        }
    }
}

fn show_screen(stdout: &mut Stdout, lines: &[&str]) -> io::Result<bool> {
    stdout.queue(Clear(ClearType::All))?;
    let (term_w, term_h) = terminal::size()?;
    let top = (term_h / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, line) in lines.iter().enumerate() {
        let w = UnicodeWidthStr::width(*line) as u16;
        let x = term_w.saturating_sub(w) / 2;
        stdout.queue(MoveTo(x, top + i as u16))?;
        stdout.queue(Print(line))?;
    }
    stdout.flush()?;
    loop {
        match wait_for_key()? {
            KeyCode::Char(' ') | KeyCode::Enter => return Ok(true),
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(false),
            _ => {}
        }
    }
}

fn show_final(stdout: &mut Stdout, game: &Game, line: &str) -> io::Result<()> {
    let summary = format!(
        "Days: {}  Score: {}  Food left: {}",
        game.current_day(),
        game.success_score(),
        game.food().max(0)
    );
    let lines = [line, "", summary.as_str(), "", "Press Q to quit."];
    stdout.queue(Clear(ClearType::All))?;
    let (term_w, term_h) = terminal::size()?;
    let top = (term_h / 2).saturating_sub(2);
    for (i, text) in lines.iter().enumerate() {
        let w = UnicodeWidthStr::width(*text) as u16;
        stdout.queue(MoveTo(term_w.saturating_sub(w) / 2, top + i as u16))?;
        stdout.queue(Print(text))?;
    }
    stdout.flush()?;
    loop {
        if let KeyCode::Char('q') | KeyCode::Char('Q') = wait_for_key()? {
            return Ok(());
        }
    }
}

fn render(
    stdout: &mut Stdout,
    game: &Game,
    status: &str,
    renderer: &mut Renderer,
) -> io::Result<()> {
    let size = renderer.size;
    let needed_h = (size + 3) as u16;
    let needed_w = (size * CELL_W) as u16;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(MoveTo(0, 0))?;
        stdout.queue(Clear(ClearType::All))?;
        stdout.queue(Print(format!(
            "Terminal too small. Need {}x{} (cols x rows), have {}x{}.",
            needed_w, needed_h, term_w, term_h
        )))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let hud = format!(
        "Day: {}  Food: {}  Steps: {}  Score: {}  (q to quit)",
        game.current_day(),
        game.food().max(0),
        game.steps(),
        game.success_score()
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for y in 0..size {
        for x in 0..size {
            let pos = Pos::new(x as i32, y as i32);
            let cell = cell_for(game, pos);
            let idx = y * size + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }

    if renderer.needs_full || status != renderer.last_status {
        stdout.queue(MoveTo(
            renderer.origin_x,
            renderer.origin_y + size as u16 + 1,
        ))?;
        stdout.queue(SetForegroundColor(Color::Grey))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(status))?;
        stdout.queue(ResetColor)?;
        renderer.last_status = status.to_string();
    }

    renderer.needs_full = false;
    stdout.flush()?;
    Ok(())
}

fn cell_for(game: &Game, pos: Pos) -> Cell {
    if pos == game.player() {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if game.enemies().contains(&pos) {
        return Cell {
            glyph: Glyph::Enemy,
            color: Color::Red,
        };
    }
    if game.guest() == Some(pos) {
        return Cell {
            glyph: Glyph::Guest,
            color: Color::Cyan,
        };
    }
    if game.cross() == Some(pos) {
        return Cell {
            glyph: Glyph::Cross,
            color: Color::Red,
        };
    }
    if game.food_items().contains(&pos) {
        return Cell {
            glyph: Glyph::Food,
            color: Color::Green,
        };
    }
    if game.is_exit(pos) {
        return Cell {
            glyph: Glyph::Exit,
            color: Color::Magenta,
        };
    }
    if game.is_walkable(pos) {
        Cell {
            glyph: Glyph::Floor,
            color: Color::Reset,
        }
    } else {
        Cell {
            glyph: Glyph::Wall,
            color: Color::DarkBlue,
        }
    }
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    x: usize,
    y: usize,
    cell: Cell,
) -> io::Result<()> {
    let text = match cell.glyph {
        Glyph::Player => "😐",
        Glyph::Enemy => "😈",
        Glyph::Food => "🍞",
        Glyph::Exit => "🚪",
        Glyph::Guest => "🧝",
        Glyph::Cross => "✚",
        Glyph::Wall => "██",
        Glyph::Floor => "  ",
    };
    // The maze's y axis points up; the screen's points down.
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + (renderer.size - 1 - y) as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(cell.color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

fn to_io(err: GameError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, err.to_string())
}
