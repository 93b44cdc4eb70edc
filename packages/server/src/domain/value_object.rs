//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of a room name, in bytes
pub const ROOM_NAME_MAX_LEN: usize = 100;

/// Connection identifier value object.
///
/// The hub's only notion of a connection's identity. Minted once per accepted
/// socket by [`ConnectionIdFactory`](super::ConnectionIdFactory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room name value object.
///
/// Case-sensitive key of a broadcast room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName.
    ///
    /// # Arguments
    ///
    /// * `name` - The room name string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = name.len();
        if len > ROOM_NAME_MAX_LEN {
            return Err(ValueObjectError::RoomNameTooLong {
                max: ROOM_NAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_name_new_success() {
        // テスト項目: 有効なルーム名を作成できる
        // given (前提条件):
        let name = "general".to_string();

        // when (操作):
        let result = RoomName::new(name);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "general");
    }

    #[test]
    fn test_room_name_new_empty_fails() {
        // テスト項目: 空のルーム名は作成できない
        // given (前提条件):
        let name = "".to_string();

        // when (操作):
        let result = RoomName::new(name);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomNameEmpty);
    }

    #[test]
    fn test_room_name_new_too_long_fails() {
        // テスト項目: 101 バイト以上のルーム名は作成できない
        // given (前提条件):
        let name = "a".repeat(101);

        // when (操作):
        let result = RoomName::new(name);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            ValueObjectError::RoomNameTooLong {
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn test_room_name_limit_counts_bytes() {
        // テスト項目: 長さ制限は文字数ではなくバイト数で判定され、エラーメッセージもバイト数で表記される
        // given (前提条件): 34 文字だが UTF-8 で 102 バイトのルーム名
        let name = "あ".repeat(34);

        // when (操作):
        let error = RoomName::new(name).unwrap_err();

        // then (期待する結果):
        assert_eq!(
            error,
            ValueObjectError::RoomNameTooLong {
                max: 100,
                actual: 102
            }
        );
        assert_eq!(error.to_string(), "RoomName cannot exceed 100 bytes (got 102)");
    }

    #[test]
    fn test_room_name_is_case_sensitive() {
        // テスト項目: ルーム名は大文字小文字を区別する
        // given (前提条件):
        let lower = RoomName::try_from("general").unwrap();
        let upper = RoomName::try_from("General").unwrap();

        // then (期待する結果):
        assert_ne!(lower, upper);
    }

    #[test]
    fn test_connection_id_display_matches_uuid() {
        // テスト項目: ConnectionId の表示形式は UUID と同じ
        // given (前提条件):
        let uuid = Uuid::new_v4();

        // when (操作):
        let id = ConnectionId::from_uuid(uuid);

        // then (期待する結果):
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(id.as_uuid(), &uuid);
    }
}
