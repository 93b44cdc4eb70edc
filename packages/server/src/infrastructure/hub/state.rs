//! インメモリのメンバーシップ索引
//!
//! 全接続の Registry と、ルーム名 → メンバー集合の対応を保持します。
//! I/O は一切行わず、`BroadcastHub` が単一の Mutex で保護して使用します。

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::domain::{Connection, ConnectionId, RoomName};

use super::RoomInfo;

/// Registry + room index.
///
/// A connection is in the registry iff it is a member of at least one room.
#[derive(Default)]
pub struct HubState {
    /// 追跡中の全接続
    registry: HashMap<ConnectionId, Connection>,
    /// ルームごとのメンバー（空になったルームも残す）
    rooms: HashMap<RoomName, HashSet<ConnectionId>>,
}

impl HubState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `connection` and add it to `room`, creating the room if needed.
    ///
    /// Both steps are idempotent. Returns the member count of `room` after
    /// the insert.
    pub fn insert(&mut self, connection: Connection, room: &RoomName) -> usize {
        let id = connection.id();
        self.registry.entry(id).or_insert(connection);

        let members = self.rooms.entry(room.clone()).or_default();
        members.insert(id);
        members.len()
    }

    /// Remove `id` from the registry and from every room.
    ///
    /// Returns each room whose membership actually changed, with its
    /// remaining member count. Unknown ids yield an empty list.
    pub fn remove(&mut self, id: &ConnectionId) -> Vec<(RoomName, usize)> {
        self.registry.remove(id);

        let mut changed: Vec<(RoomName, usize)> = self
            .rooms
            .iter_mut()
            .filter_map(|(room, members)| {
                members
                    .remove(id)
                    .then(|| (room.clone(), members.len()))
            })
            .collect();
        changed.sort_by(|a, b| a.0.cmp(&b.0));
        changed
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.registry.contains_key(id)
    }

    /// Snapshot of the members of `room`, minus `exclude`.
    pub fn room_members(
        &self,
        room: &RoomName,
        exclude: Option<&ConnectionId>,
    ) -> Vec<Connection> {
        let Some(members) = self.rooms.get(room) else {
            return Vec::new();
        };
        members
            .iter()
            .filter(|id| Some(*id) != exclude)
            .filter_map(|id| self.registry.get(id))
            .cloned()
            .collect()
    }

    /// Snapshot of every tracked connection.
    pub fn connections(&self) -> Vec<Connection> {
        self.registry.values().cloned().collect()
    }

    /// Rooms `id` currently belongs to, sorted by name.
    pub fn rooms_of(&self, id: &ConnectionId) -> Vec<RoomName> {
        let mut rooms: Vec<RoomName> = self
            .rooms
            .iter()
            .filter(|(_, members)| members.contains(id))
            .map(|(room, _)| room.clone())
            .collect();
        rooms.sort();
        rooms
    }

    pub fn room_info(&self, room: &RoomName) -> RoomInfo {
        let members = self.rooms.get(room);
        RoomInfo {
            room: room.clone(),
            member_count: members.map_or(0, HashSet::len),
            exists: members.is_some(),
        }
    }

    /// Member count of every room ever created, empty ones included.
    pub fn room_counts(&self) -> BTreeMap<String, usize> {
        self.rooms
            .iter()
            .map(|(room, members)| (room.to_string(), members.len()))
            .collect()
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }
}
