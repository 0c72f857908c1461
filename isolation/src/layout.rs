//! 棋盘布局的文本格式
//!
//! 格式：`<各行> [走子方]`
//!
//! 各行用 `/` 分隔，第一行是 y=0。`.` 空白，`#` 已访问，`1`/`2` 为双方位置。
//! 走子方为 `1` 或 `2`，省略时为先手。
//!
//! 示例：`1../.#./..2 1`

use crate::board::Board;
use crate::error::{BoardError, Result};
use crate::player::{Move, Player};

/// 布局格式处理
pub struct Layout;

impl Layout {
    /// 解析布局字符串
    pub fn parse(layout: &str) -> Result<Board> {
        let parts: Vec<&str> = layout.split_whitespace().collect();
        if parts.is_empty() {
            return Err(Self::invalid("Empty layout string"));
        }
        if parts.len() > 2 {
            return Err(Self::invalid(format!("Expected at most 2 fields, got {}", parts.len())));
        }

        let rows: Vec<&str> = parts[0].split('/').collect();
        let width = rows[0].chars().count();
        let mut board = Board::new(width, rows.len())
            .map_err(|e| Self::invalid(e.to_string()))?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(Self::invalid(format!(
                    "Row {} has {} columns, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }

            for (x, c) in row.chars().enumerate() {
                let pos = Move::new(x as i32, y as i32);
                match c {
                    '.' => {}
                    '#' => board.block(pos)?,
                    _ => {
                        let player = Player::from_layout_char(c).ok_or_else(|| {
                            Self::invalid(format!("Invalid cell character: {}", c))
                        })?;
                        if board.location(player).is_some() {
                            return Err(Self::invalid(format!("Duplicate {}", player)));
                        }
                        board.place(player, pos)?;
                    }
                }
            }
        }

        if let Some(active) = parts.get(1) {
            let mut chars = active.chars();
            let player = match (chars.next(), chars.next()) {
                (Some(c), None) => Player::from_layout_char(c),
                _ => None,
            }
            .ok_or_else(|| Self::invalid(format!("Invalid active player: {}", active)))?;
            board.set_active(player);
        }

        Ok(board)
    }

    /// 将棋盘转换为布局字符串
    pub fn to_string(board: &Board) -> String {
        let rows: Vec<String> = (0..board.height())
            .map(|y| {
                (0..board.width())
                    .map(|x| {
                        let pos = Move::new(x as i32, y as i32);
                        if board.location(Player::First) == Some(pos) {
                            '1'
                        } else if board.location(Player::Second) == Some(pos) {
                            '2'
                        } else if board.is_blank(pos) {
                            '.'
                        } else {
                            '#'
                        }
                    })
                    .collect()
            })
            .collect();

        format!("{} {}", rows.join("/"), board.active().to_layout_char())
    }

    fn invalid(reason: impl Into<String>) -> BoardError {
        BoardError::InvalidLayout {
            reason: reason.into(),
        }
    }
}
