//! Core domain types: identities, token amounts, doors, and game events.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Longest account identity accepted. Anything longer is truncated by
/// [`AccountId::new`].
pub const MAX_ACCOUNT_ID_LENGTH: usize = 64;

/// An account identity, as reported by the call dispatch layer.
///
/// Construction normalizes the raw string (lowercased, whitespace
/// stripped, length capped) so two spellings of the same account
/// compare equal.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(s: &str) -> Self {
        let mut account: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        account.truncate(MAX_ACCOUNT_ID_LENGTH);
        Self(account)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Yocto units per whole NEAR token.
const YOCTO_PER_NEAR: u128 = 1_000_000_000_000_000_000_000_000;

/// A fixed-point NEAR token amount, denominated in yocto units.
///
/// The pot, the fee, and attached deposits are all carried as
/// `NearAmount`s. Arithmetic saturates rather than wrapping.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct NearAmount(u128);

impl NearAmount {
    pub const ZERO: Self = Self(0);

    /// One whole NEAR, the pot floor and default session fee.
    pub const ONE_NEAR: Self = Self(YOCTO_PER_NEAR);

    pub const fn from_yocto(yocto: u128) -> Self {
        Self(yocto)
    }

    pub const fn from_near(near: u128) -> Self {
        Self(near * YOCTO_PER_NEAR)
    }

    pub const fn as_yocto(self) -> u128 {
        self.0
    }

    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NearAmount {
    /// Renders as `"<amount> NEAR"`, trimming trailing zeros from any
    /// fractional part.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / YOCTO_PER_NEAR;
        let frac = self.0 % YOCTO_PER_NEAR;
        if frac == 0 {
            write!(f, "{whole} NEAR")
        } else {
            let frac = format!("{frac:024}");
            write!(f, "{whole}.{} NEAR", frac.trim_end_matches('0'))
        }
    }
}

/// One of the three doors a player may pick.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Door {
    One,
    Two,
    Three,
}

impl Door {
    pub const ALL: [Door; 3] = [Door::One, Door::Two, Door::Three];

    /// The door's 1-based index.
    pub const fn number(self) -> u8 {
        match self {
            Door::One => 1,
            Door::Two => 2,
            Door::Three => 3,
        }
    }

    pub const fn from_number(n: u8) -> Option<Door> {
        match n {
            1 => Some(Door::One),
            2 => Some(Door::Two),
            3 => Some(Door::Three),
            _ => None,
        }
    }

    /// The unique door that is neither `a` nor `b` (door indices sum
    /// to six). Yields the first door outside `{a, b}` when the
    /// arguments are equal.
    pub fn remaining(a: Door, b: Door) -> Door {
        match Self::ALL.iter().find(|door| **door != a && **door != b) {
            Some(door) => *door,
            // Unreachable: two exclusions cannot cover three doors.
            None => a,
        }
    }
}

impl fmt::Display for Door {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Named session phases, for views and logs.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Idle,
    Ready,
    FirstPick,
    FinalPick,
    PendingPayout,
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            StageName::Idle => "idle",
            StageName::Ready => "ready",
            StageName::FirstPick => "first_pick",
            StageName::FinalPick => "final_pick",
            StageName::PendingPayout => "pending_payout",
        };
        write!(f, "{repr}")
    }
}

/// Read-only snapshot of the engine, safe to hand to any caller.
///
/// The winning door and recorded choices are deliberately absent: they
/// stay hidden until the final reveal event.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameView {
    pub owner: AccountId,
    pub current_player: Option<AccountId>,
    pub pot: NearAmount,
    pub fee: NearAmount,
    pub stage: StageName,
}

/// Narrative events emitted by the engine as a session progresses.
///
/// These are observational output for callers, not part of the state
/// contract. Queued inside the engine and drained once per call.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum GameEvent {
    /// A turn arrived while no session was active.
    NoActiveSession,
    /// Session started; all three doors are closed, pot at stake shown.
    DoorsPresented { pot: NearAmount },
    /// A goat door was opened and the switch offer made.
    GoatRevealed {
        first_choice: Option<Door>,
        opened_door: Door,
        switch_offer: Option<Door>,
    },
    /// Stage-3 choice matched neither option; state unchanged.
    ChoiceRejected {
        choice: Option<Door>,
        opened_door: Door,
    },
    /// Final reveal of all three doors.
    DoorsOpened {
        winning_door: Door,
        final_choice: Door,
    },
    Won {
        player: AccountId,
        amount: NearAmount,
    },
    Lost {
        player: Option<AccountId>,
        pot: NearAmount,
    },
    /// Payout confirmed; the session is fully settled.
    GameOver,
}

/// Renders the three-door row with `render` deciding each door's glyph.
fn door_row(render: impl Fn(Door) -> &'static str) -> String {
    format!(
        "  {}    {}    {}  \n   1     2     3  ",
        render(Door::One),
        render(Door::Two),
        render(Door::Three)
    )
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveSession => {
                write!(f, "The game is not started. Please call start_game.")
            }
            Self::DoorsPresented { pot } => write!(
                f,
                "Welcome to the Monty Hall game!\n\
                 Here are three doors. Behind one door is {pot}.\n\
                 Behind the other two are goats.\n\
                 Choose your door:\n{}",
                door_row(|_| "🚪")
            ),
            Self::GoatRevealed {
                first_choice,
                opened_door,
                switch_offer,
            } => {
                match first_choice {
                    Some(first) => writeln!(f, "You chose door {first}.")?,
                    None => writeln!(f, "You made no choice.")?,
                }
                writeln!(f, "I open door {opened_door} and there's a goat!")?;
                if let Some(offer) = switch_offer {
                    writeln!(f, "Do you want to switch your choice to door {offer}?")?;
                }
                write!(
                    f,
                    "Choose your door:\n{}",
                    door_row(|d| if d == *opened_door { "🐐" } else { "🚪" })
                )
            }
            Self::ChoiceRejected {
                choice,
                opened_door,
            } => {
                match choice {
                    Some(door) if door == opened_door => {
                        writeln!(f, "Door {door} is already open.")?;
                    }
                    Some(door) => writeln!(f, "Door {door} is not on offer.")?,
                    None => writeln!(f, "No door chosen.")?,
                }
                write!(f, "Choose another door!")
            }
            Self::DoorsOpened {
                winning_door,
                final_choice,
            } => write!(
                f,
                "You chose door {final_choice}.\n\
                 What was behind the doors:\n{}",
                door_row(|d| if d == *winning_door { "💰" } else { "🐐" })
            ),
            Self::Won { player, amount } => write!(f, "You ({player}) won {amount}!"),
            Self::Lost { player, pot } => {
                match player {
                    Some(player) => writeln!(f, "You ({player}) did not win.")?,
                    None => writeln!(f, "You did not win.")?,
                }
                write!(f, "The pot is currently {pot}.")
            }
            Self::GameOver => write!(f, "Game over."),
        }
    }
}
