//! Pure rendering of a [`ViewState`] into a grid of text cards.

use std::fmt;

use crate::model::game::Game;
use crate::model::team::GameTeam;
use crate::state::ViewState;

pub const SKELETON_COUNT: usize = 6;
/// Outer width of a card including its border.
pub const CARD_WIDTH: usize = 30;
pub const GAP: usize = 2;
pub const MAX_COLUMNS: usize = 3;

const INNER_WIDTH: usize = CARD_WIDTH - 4;
const BLOCK: char = '░';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardKey {
    Skeleton(usize),
    Game(u64),
}

/// A card's identity plus its content lines, each exactly the inner card width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub key: CardKey,
    pub lines: Vec<String>,
}

impl Card {
    pub fn is_skeleton(&self) -> bool {
        matches!(self.key, CardKey::Skeleton(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    columns: usize,
}

impl Layout {
    /// Small terminals get one column, medium two, large three.
    pub fn for_width(width: usize) -> Self {
        let mut columns = 1;
        while columns < MAX_COLUMNS && (columns + 1) * CARD_WIDTH + columns * GAP <= width {
            columns += 1;
        }
        Self { columns }
    }

    pub fn fixed(columns: usize) -> Self {
        Self { columns: columns.clamp(1, MAX_COLUMNS) }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub heading: String,
    pub notice: Option<String>,
    pub cards: Vec<Card>,
    pub columns: usize,
}

impl Grid {
    pub fn skeleton_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_skeleton()).count()
    }

    pub fn game_keys(&self) -> Vec<u64> {
        self.cards
            .iter()
            .filter_map(|c| match c.key {
                CardKey::Game(pk) => Some(pk),
                CardKey::Skeleton(_) => None,
            })
            .collect()
    }

    /// Number of terminal lines the grid occupies when displayed.
    pub fn height(&self) -> usize {
        self.to_string().lines().count()
    }
}

pub fn render(state: &ViewState, layout: Layout) -> Grid {
    let heading = match state.date {
        Some(date) => format!("Today's MLB Games ({})", date.format("%a %b %-d, %Y")),
        None => "Today's MLB Games".to_string(),
    };

    let (cards, notice) = if state.loading {
        ((0..SKELETON_COUNT).map(skeleton_card).collect(), None)
    } else {
        let notice = match (&state.error, state.games.is_empty()) {
            (Some(_), _) => Some("Could not load games.".to_string()),
            (None, true) => Some("No games scheduled.".to_string()),
            (None, false) => None,
        };
        (state.games.iter().map(game_card).collect(), notice)
    };

    Grid { heading, notice, cards, columns: layout.columns() }
}

pub fn game_card(game: &Game) -> Card {
    let status = format!("{} - {}", game.status.detailed_state, game.venue.name);
    Card {
        key: CardKey::Game(game.game_pk),
        lines: vec![
            team_row(&game.teams.away),
            team_row(&game.teams.home),
            centered(&status, INNER_WIDTH),
        ],
    }
}

pub fn skeleton_card(index: usize) -> Card {
    let name = BLOCK.to_string().repeat(INNER_WIDTH / 2);
    let score = BLOCK.to_string().repeat(3);
    let row = spread(&name, &score, INNER_WIDTH);
    let status = BLOCK.to_string().repeat(INNER_WIDTH * 3 / 4);
    Card {
        key: CardKey::Skeleton(index),
        lines: vec![row.clone(), row, centered(&status, INNER_WIDTH)],
    }
}

fn team_row(side: &GameTeam) -> String {
    let score = side.score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
    spread(&side.team.name, &score, INNER_WIDTH)
}

/// Left text and right text pushed to opposite edges, left truncated to keep one space between.
fn spread(left: &str, right: &str, width: usize) -> String {
    let right_len = right.chars().count();
    let left = truncate(left, width.saturating_sub(right_len + 1));
    let pad = width.saturating_sub(left.chars().count() + right_len);
    format!("{}{}{}", left, " ".repeat(pad), right)
}

fn centered(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let len = text.chars().count();
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f)?;
        if let Some(notice) = &self.notice {
            writeln!(f, "{}", notice)?;
        }

        let gap = " ".repeat(GAP);
        let border = "─".repeat(CARD_WIDTH - 2);
        for row in self.cards.chunks(self.columns.max(1)) {
            let top: Vec<String> = row.iter().map(|_| format!("╭{}╮", border)).collect();
            writeln!(f, "{}", top.join(&gap))?;

            let height = row.iter().map(|c| c.lines.len()).max().unwrap_or(0);
            for i in 0..height {
                let cells: Vec<String> = row
                    .iter()
                    .map(|c| {
                        let line = c.lines.get(i).map(String::as_str).unwrap_or("");
                        format!("│ {:<w$} │", line, w = INNER_WIDTH)
                    })
                    .collect();
                writeln!(f, "{}", cells.join(&gap))?;
            }

            let bottom: Vec<String> = row.iter().map(|_| format!("╰{}╯", border)).collect();
            writeln!(f, "{}", bottom.join(&gap))?;
        }
        Ok(())
    }
}
