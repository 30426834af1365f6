//! Key bindings: symbolic key names to sliding directions.
//!
//! Front ends translate their native key events into a key name (`"w"`, `"Up"`, ...)
//! and hand it to `direction_for_key`. Anything not in the table is rejected with
//! `GameError::InvalidDirection`, which the controller treats as a no-op.
use crate::engine::Direction;
use crate::error::GameError;

/// Keys that slide the tiles up.
pub const UP_KEYS: &[&str] = &["w", "W", "Up", "ArrowUp"];
/// Keys that slide the tiles left.
pub const LEFT_KEYS: &[&str] = &["a", "A", "Left", "ArrowLeft"];
/// Keys that slide the tiles down.
pub const DOWN_KEYS: &[&str] = &["s", "S", "Down", "ArrowDown"];
/// Keys that slide the tiles right.
pub const RIGHT_KEYS: &[&str] = &["d", "D", "Right", "ArrowRight"];

/// Every binding, in lookup order.
pub const KEY_BINDINGS: [(Direction, &[&str]); 4] = [
    (Direction::Up, UP_KEYS),
    (Direction::Left, LEFT_KEYS),
    (Direction::Down, DOWN_KEYS),
    (Direction::Right, RIGHT_KEYS),
];

/// Looks up the direction bound to `key`.
///
/// # Examples
/// ```
/// use tile2048::engine::Direction;
/// use tile2048::input::direction_for_key;
/// assert_eq!(direction_for_key("W").unwrap(), Direction::Up);
/// assert_eq!(direction_for_key("Right").unwrap(), Direction::Right);
/// assert!(direction_for_key("q").is_err());
/// ```
pub fn direction_for_key(key: &str) -> Result<Direction, GameError> {
    KEY_BINDINGS
        .iter()
        .find(|(_, keys)| keys.contains(&key))
        .map(|&(direction, _)| direction)
        .ok_or_else(|| GameError::InvalidDirection(key.to_string()))
}
