use chrono::Utc;
use crossterm::event::{self, Event, KeyCode};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use shardfall::build_info;
use shardfall::constants::TICK_INTERVAL_MS;
use shardfall::equipment::EquipmentId;
use shardfall::session::GameSession;
use shardfall::ui::{self, ShopCursor, ShopSection};
use std::io;
use std::time::{Duration, Instant};

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--version" | "-v" => {
                println!(
                    "shardfall {} ({})",
                    build_info::BUILD_DATE,
                    build_info::BUILD_COMMIT
                );
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Shardfall - Terminal-Based Idle RPG\n");
                println!("Usage: shardfall [command]\n");
                println!("Commands:");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'shardfall --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_game(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    let mut session = GameSession::new(Utc::now().timestamp());
    let mut cursor = ShopCursor::new();
    let mut last_tick = Instant::now();

    session.start();

    loop {
        terminal.draw(|frame| ui::draw(frame, session.state(), &cursor))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key_event) = event::read()? {
                match key_event.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char(' ') => {
                        if let Err(err) = session.manual_attack() {
                            session.state_mut().add_battle_log(format!("❌ {}", err));
                        }
                    }
                    KeyCode::Char('s') => {
                        if session.is_running() {
                            session.stop();
                        } else {
                            session.start();
                        }
                    }
                    KeyCode::Char('r') => {
                        session.reset();
                    }
                    KeyCode::Tab => cursor.toggle_section(),
                    KeyCode::Up => cursor.move_up(),
                    KeyCode::Down => cursor.move_down(session.state()),
                    KeyCode::Enter => handle_purchase(&mut session, &cursor),
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= Duration::from_millis(TICK_INTERVAL_MS) {
            let delta = last_tick.elapsed().as_secs_f64();
            last_tick = Instant::now();
            session.tick(delta);
        }
    }

    Ok(())
}

fn handle_purchase(session: &mut GameSession, cursor: &ShopCursor) {
    let result = match cursor.section {
        ShopSection::Nodes => {
            let node_id = session
                .state()
                .nodes
                .keys()
                .nth(cursor.index)
                .cloned();
            match node_id {
                Some(id) => session.upgrade_node(&id).map(|_| ()),
                None => return,
            }
        }
        ShopSection::Equipment => {
            let ids = EquipmentId::all();
            match ids.get(cursor.index) {
                Some(id) => session.buy_equipment(*id).map(|_| ()),
                None => return,
            }
        }
    };

    if let Err(err) = result {
        session.state_mut().add_battle_log(format!("❌ {}", err));
    }
}
