//! Terminal presentation layer. Strictly read-only over [`GameState`]; all
//! mutation goes through the session's action interface in `main.rs`.

use crate::attributes::AttributeType;
use crate::equipment::{upgrade_cost, EquipmentId};
use crate::game_state::GameState;
use crate::monster::{evolution_stage, is_boss, MonsterPassive};
use crate::passives::PassiveTrackId;
use crate::progression::upgrade_preview;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Which shop column the cursor sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopSection {
    Nodes,
    Equipment,
}

/// Cursor state for the shop panel, owned by the main loop.
#[derive(Debug, Clone, Copy)]
pub struct ShopCursor {
    pub section: ShopSection,
    pub index: usize,
}

impl ShopCursor {
    pub fn new() -> Self {
        Self {
            section: ShopSection::Nodes,
            index: 0,
        }
    }

    pub fn toggle_section(&mut self) {
        self.section = match self.section {
            ShopSection::Nodes => ShopSection::Equipment,
            ShopSection::Equipment => ShopSection::Nodes,
        };
        self.index = 0;
    }

    pub fn move_up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn move_down(&mut self, state: &GameState) {
        let len = match self.section {
            ShopSection::Nodes => state.nodes.len(),
            ShopSection::Equipment => EquipmentId::all().len(),
        };
        if self.index + 1 < len {
            self.index += 1;
        }
    }
}

impl Default for ShopCursor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn draw(frame: &mut Frame, state: &GameState, cursor: &ShopCursor) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(16),    // Body
            Constraint::Length(10), // Battle log
            Constraint::Length(3),  // Footer
        ])
        .split(frame.size());

    draw_header(frame, chunks[0], state);
    draw_body(frame, chunks[1], state, cursor);
    draw_battle_log(frame, chunks[2], state);
    draw_footer(frame, chunks[3], state);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &GameState) {
    let status = if state.is_running {
        Span::styled("RUNNING", Style::default().fg(Color::Green))
    } else {
        Span::styled("PAUSED", Style::default().fg(Color::Red))
    };

    let text = vec![Line::from(vec![
        Span::styled(
            "SHARDFALL",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        status,
        Span::raw(" | "),
        Span::styled(
            format!("Essence: {}", state.player.essence),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(" | "),
        Span::styled(
            format!("Soul Shards: {}", state.soul_shards),
            Style::default().fg(Color::Magenta),
        ),
        Span::raw(" | "),
        Span::raw(format!(
            "Kills: {} | Play: {:.0}s",
            state.total_monsters_killed, state.play_time_seconds
        )),
    ])];

    let header = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_body(frame: &mut Frame, area: Rect, state: &GameState, cursor: &ShopCursor) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(36),
            Constraint::Percentage(30),
            Constraint::Percentage(34),
        ])
        .split(area);

    draw_monster_panel(frame, columns[0], state);
    draw_player_panel(frame, columns[1], state);
    draw_shop_panel(frame, columns[2], state, cursor);
}

fn draw_monster_panel(frame: &mut Frame, area: Rect, state: &GameState) {
    let monster = &state.monster;
    let evo = evolution_stage(monster.level);
    let stage_color = Color::Rgb(evo.color.0, evo.color.1, evo.color.2);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Name / level / passive
            Constraint::Length(3), // HP gauge
            Constraint::Length(3), // Battle timer gauge
            Constraint::Min(0),
        ])
        .split(area);

    let passive = match monster.passive {
        MonsterPassive::None => Span::raw("-"),
        MonsterPassive::HardSkin => Span::styled("HARD SKIN", Style::default().fg(Color::Yellow)),
        MonsterPassive::Dodge => Span::styled("DODGE", Style::default().fg(Color::Green)),
        MonsterPassive::Reflect => Span::styled("REFLECT", Style::default().fg(Color::Red)),
        MonsterPassive::Regen => Span::styled("REGEN", Style::default().fg(Color::Cyan)),
    };

    let info = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} (Stage {})", monster.name, monster.stage),
            Style::default().fg(stage_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(format!("Level {} ", monster.level)),
            if is_boss(monster.level) {
                Span::styled("BOSS", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            } else {
                Span::raw("")
            },
        ]),
        Line::from(vec![Span::raw("Passive: "), passive]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Monster"));
    frame.render_widget(info, rows[0]);

    let hp_ratio = if monster.max_hp > 0.0 {
        (monster.hp / monster.max_hp).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let hp_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("HP"))
        .gauge_style(Style::default().fg(Color::Red))
        .ratio(hp_ratio)
        .label(format!("{:.0}/{:.0}", monster.hp, monster.max_hp));
    frame.render_widget(hp_gauge, rows[1]);

    let time_ratio = if state.max_battle_time > 0.0 {
        (state.battle_timer / state.max_battle_time).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let timer_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Battle Timer"))
        .gauge_style(Style::default().fg(Color::Blue))
        .ratio(time_ratio)
        .label(format!("{:.1}s", state.battle_timer.max(0.0)));
    frame.render_widget(timer_gauge, rows[2]);
}

fn draw_player_panel(frame: &mut Frame, area: Rect, state: &GameState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(8)])
        .split(area);

    let player = &state.player;
    let stats = Paragraph::new(vec![
        Line::from(format!("ATK: {}", player.atk)),
        Line::from(format!("Attack Speed: {:.2}/s", player.attack_speed)),
        Line::from(format!("Crit Rate: {:.1}%", player.crit_rate)),
        Line::from(format!("Crit Damage: {:.0}%", player.crit_damage)),
        Line::from(format!("HP: {}/{}", player.hp, player.max_hp)),
        Line::from(
            AttributeType::all()
                .iter()
                .map(|attr| {
                    format!(
                        "{} {:.1}  ",
                        state.rules.attribute_name(*attr),
                        player.attributes.get(*attr)
                    )
                })
                .collect::<String>(),
        ),
    ])
    .block(Block::default().borders(Borders::ALL).title("Character"));
    frame.render_widget(stats, rows[0]);

    let passives: Vec<Line> = PassiveTrackId::all()
        .iter()
        .map(|id| {
            let track = state.passives.get(*id);
            Line::from(format!(
                "{:<12} Lv.{:<3} {}/{}",
                id.name(),
                track.level,
                track.essence,
                track.required_essence
            ))
        })
        .collect();
    let passives_panel = Paragraph::new(passives)
        .block(Block::default().borders(Borders::ALL).title("Passives"));
    frame.render_widget(passives_panel, rows[1]);
}

fn draw_shop_panel(frame: &mut Frame, area: Rect, state: &GameState, cursor: &ShopCursor) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Nodes (essence)
    let mut node_lines = Vec::new();
    for (i, node) in state.nodes.values().enumerate() {
        let preview = upgrade_preview(&state.nodes, node, &state.rules, state.monster.level);
        let selected = cursor.section == ShopSection::Nodes && cursor.index == i;
        let style = if selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else if state.player.essence >= preview.cost {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        node_lines.push(Line::from(Span::styled(
            format!(
                "{} Lv.{} (+{} {}) - {} essence",
                node.name,
                node.level,
                preview.displayed_gain,
                state.rules.attribute_name(node.attribute),
                preview.cost
            ),
            style,
        )));
    }
    let nodes_panel = Paragraph::new(node_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Awakening (essence)"),
    );
    frame.render_widget(nodes_panel, rows[0]);

    // Equipment (soul shards)
    let mut equip_lines = Vec::new();
    for (i, id) in EquipmentId::all().into_iter().enumerate() {
        let item = state.equipment.get(id);
        let cost = upgrade_cost(item.level);
        let selected = cursor.section == ShopSection::Equipment && cursor.index == i;
        let style = if selected {
            Style::default().fg(Color::Black).bg(Color::Magenta)
        } else if state.soul_shards >= cost {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        equip_lines.push(Line::from(Span::styled(
            format!(
                "{} Lv.{} ({}) - {} 💎",
                id.name(),
                item.level,
                id.description(),
                cost
            ),
            style,
        )));
    }
    let equip_panel = Paragraph::new(equip_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Forge (soul shards)"),
    );
    frame.render_widget(equip_panel, rows[1]);
}

fn draw_battle_log(frame: &mut Frame, area: Rect, state: &GameState) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .battle_log
        .iter()
        .take(visible)
        .map(|entry| Line::from(entry.as_str()))
        .collect();
    let log = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Battle Log"));
    frame.render_widget(log, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &GameState) {
    let hint = if state.is_running {
        "[space] attack  [s] pause  [tab] shop section  [↑/↓] select  [enter] buy  [r] reset  [q] quit"
    } else {
        "[s] start  [tab] shop section  [↑/↓] select  [enter] buy  [r] reset  [q] quit"
    };
    let footer = Paragraph::new(hint)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
