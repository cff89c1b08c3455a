use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseTileError;

/// 花色
///
/// 万、筒、条为数牌（1-9），字牌（Special）只有 1-7：东南西北白发中
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// 万子
    Character = 0,
    /// 筒子
    Dot = 1,
    /// 条子
    Bamboo = 2,
    /// 字牌
    Special = 3,
}

impl Suit {
    /// 所有花色（按排序顺序）
    pub fn all() -> [Suit; 4] {
        [Suit::Character, Suit::Dot, Suit::Bamboo, Suit::Special]
    }

    /// 三种数牌花色
    pub fn numbered() -> [Suit; 3] {
        [Suit::Character, Suit::Dot, Suit::Bamboo]
    }

    /// 是否为数牌（只有数牌可以组成顺子）
    pub fn is_numbered(self) -> bool {
        !matches!(self, Suit::Special)
    }

    /// 该花色的最大点数
    pub fn max_rank(self) -> u8 {
        match self {
            Suit::Special => Tile::MAX_SPECIAL_RANK,
            _ => Tile::MAX_RANK,
        }
    }

    /// 牌面记号中的花色字母
    pub fn marker(self) -> char {
        match self {
            Suit::Character => 'C',
            Suit::Dot => 'D',
            Suit::Bamboo => 'B',
            Suit::Special => 'S',
        }
    }

    /// 由花色字母解析（不区分大小写）
    pub fn from_marker(marker: char) -> Option<Suit> {
        match marker.to_ascii_uppercase() {
            'C' => Some(Suit::Character),
            'D' => Some(Suit::Dot),
            'B' => Some(Suit::Bamboo),
            'S' => Some(Suit::Special),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Suit::Character => "Character",
            Suit::Dot => "Dot",
            Suit::Bamboo => "Bamboo",
            Suit::Special => "Special",
        }
    }
}

/// 牌所在位置
///
/// 位置只是标签，不参与牌的相等性和排序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Location {
    /// 在手牌中（牌堆里未摸的牌也使用此标签）
    #[default]
    Hand,
    /// 已副露（碰、吃、杠）
    Revealed,
    /// 已打出
    Discarded,
    /// 王牌（不可摸的保留牌）
    DeadWall,
}

/// 字牌名称，点数 1-7
pub const SPECIAL_NAMES: [&str; 7] = ["East", "South", "West", "North", "White", "Green", "Red"];

/// 一张麻将牌
///
/// 相等、排序和哈希只看 `(suit, rank)`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tile {
    suit: Suit,
    rank: u8,
    #[serde(default)]
    location: Location,
}

impl Tile {
    /// 数牌最小/最大点数
    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 9;
    /// 字牌最大点数
    pub const MAX_SPECIAL_RANK: u8 = 7;
    /// 牌的种类数：3 × 9 + 7 = 34
    pub const KINDS: usize = 34;
    /// 每种牌的张数
    pub const COPIES: u8 = 4;

    /// 创建一张牌，验证点数范围
    pub fn new(suit: Suit, rank: u8) -> Option<Self> {
        if rank < Self::MIN_RANK || rank > suit.max_rank() {
            return None;
        }
        Some(Self {
            suit,
            rank,
            location: Location::Hand,
        })
    }

    /// 用于固定字面量的构造函数，点数必须合法
    pub fn character(rank: u8) -> Self {
        Self::literal(Suit::Character, rank)
    }

    pub fn dot(rank: u8) -> Self {
        Self::literal(Suit::Dot, rank)
    }

    pub fn bamboo(rank: u8) -> Self {
        Self::literal(Suit::Bamboo, rank)
    }

    pub fn special(rank: u8) -> Self {
        Self::literal(Suit::Special, rank)
    }

    fn literal(suit: Suit, rank: u8) -> Self {
        debug_assert!((Self::MIN_RANK..=suit.max_rank()).contains(&rank));
        Self {
            suit,
            rank,
            location: Location::Hand,
        }
    }

    /// 获取花色
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// 获取点数
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// 获取位置标签
    pub fn location(&self) -> Location {
        self.location
    }

    /// 返回同一张牌、换一个位置标签
    pub fn with_location(self, location: Location) -> Self {
        Self { location, ..self }
    }

    /// 转换为种类索引（0-33）
    ///
    /// - 万子：0-8
    /// - 筒子：9-17
    /// - 条子：18-26
    /// - 字牌：27-33
    pub fn to_index(&self) -> usize {
        self.suit as usize * 9 + (self.rank - 1) as usize
    }

    /// 从种类索引创建牌
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= Self::KINDS {
            return None;
        }
        let suit = Suit::all()[index / 9];
        Self::new(suit, (index % 9) as u8 + 1)
    }

    /// 检查是否为同一类型的牌（与 `==` 相同，保留以便阅读）
    pub fn same_type(&self, other: &Tile) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }

    /// 同花色的下一张数牌，没有环绕（9 之后没有牌）
    pub fn next(&self) -> Option<Tile> {
        if !self.suit.is_numbered() || self.rank >= Self::MAX_RANK {
            return None;
        }
        Some(Self::literal(self.suit, self.rank + 1))
    }

    /// 检查三张牌是否可以组成顺子
    pub fn can_form_sequence(&self, other1: &Tile, other2: &Tile) -> bool {
        if !self.suit.is_numbered() || self.suit != other1.suit || self.suit != other2.suit {
            return false;
        }
        let mut ranks = [self.rank, other1.rank, other2.rank];
        ranks.sort_unstable();
        ranks[0] + 1 == ranks[1] && ranks[1] + 1 == ranks[2]
    }

    /// 可读名称，用于控制台显示
    pub fn name(&self) -> String {
        match self.suit {
            Suit::Special => SPECIAL_NAMES[(self.rank - 1) as usize].to_string(),
            suit => format!("{} {}", self.rank, suit.name()),
        }
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.same_type(other)
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.suit.hash(state);
        self.rank.hash(state);
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.suit, self.rank).cmp(&(other.suit, other.rank))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.marker(), self.rank)
    }
}

impl FromStr for Tile {
    type Err = ParseTileError;

    /// 解析单张牌记号，例如 `D5`、`s3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let marker = chars.next().ok_or(ParseTileError::Truncated)?;
        let digit = chars.next().ok_or(ParseTileError::Truncated)?;
        if let Some(extra) = chars.next() {
            return Err(ParseTileError::UnexpectedChar(extra));
        }
        parse_token(marker, digit)
    }
}

/// 解析一个 “花色字母 + 点数数字” 记号
pub(crate) fn parse_token(marker: char, digit: char) -> Result<Tile, ParseTileError> {
    let suit = Suit::from_marker(marker).ok_or(ParseTileError::UnknownSuit(marker))?;
    let rank = digit
        .to_digit(10)
        .ok_or(ParseTileError::InvalidRank { suit, rank: digit })?;
    Tile::new(suit, rank as u8).ok_or(ParseTileError::InvalidRank { suit, rank: digit })
}
