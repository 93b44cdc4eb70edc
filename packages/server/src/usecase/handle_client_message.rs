//! UseCase: クライアントメッセージ処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - HandleClientMessageUseCase::execute() / execute_invalid() メソッド
//! - メッセージ種別ごとのハブ操作（ルーム配信、個別返信、全体配信）
//!
//! ### なぜこのテストが必要か
//! - チャットが送信者以外のルームメンバーにだけ届くことを保証
//! - 管理者ブロードキャストが admin_key なしで実行されないことを保証
//! - 返信の失敗が呼び出し元に伝わり、読み取りループを止められることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：chat / ping / get_stats / broadcast
//! - 異常系：不正な admin_key、未知の type、壊れた JSON
//! - エッジケース：返信先の接続が既に死んでいる

use crate::{
    domain::{Connection, RoomName, SendError, ServerMessage},
    infrastructure::{
        BroadcastHub,
        dto::websocket::{ClientMessage, ClientMessageError},
    },
};

/// クライアントメッセージ処理のユースケース
pub struct HandleClientMessageUseCase {
    hub: BroadcastHub,
    /// 管理者ブロードキャストに必要なキー（None の場合は常に拒否）
    admin_key: Option<String>,
}

impl HandleClientMessageUseCase {
    /// 新しい HandleClientMessageUseCase を作成
    pub fn new(hub: BroadcastHub, admin_key: Option<String>) -> Self {
        Self { hub, admin_key }
    }

    /// クライアントメッセージを処理
    ///
    /// # Arguments
    ///
    /// * `sender` - メッセージを送ってきた接続
    /// * `room` - 送信者が参加しているルーム
    /// * `message` - パース済みのメッセージ
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 処理完了（ルーム配信の部分的な失敗はハブが後始末済み）
    /// * `Err(SendError)` - 送信者への返信に失敗（送信者は既にハブから削除済み）
    pub async fn execute(
        &self,
        sender: &Connection,
        room: &RoomName,
        message: ClientMessage,
    ) -> Result<(), SendError> {
        match message {
            ClientMessage::Chat { message, timestamp } => {
                tracing::debug!("Chat from '{}' in room '{}': {}", sender.id(), room, message);
                let chat = ServerMessage::chat(room, message, timestamp);
                self.hub
                    .broadcast_to_room(room, &chat, Some(&sender.id()))
                    .await;
                Ok(())
            }
            ClientMessage::Ping { timestamp } => {
                self.hub
                    .send_to(sender, &ServerMessage::pong(timestamp))
                    .await
            }
            ClientMessage::GetStats {} => {
                let stats = self.hub.stats().await;
                let reply = ServerMessage::Stats {
                    total_connections: stats.total_connections,
                    rooms: stats.rooms,
                    timestamp: stats.timestamp,
                };
                self.hub.send_to(sender, &reply).await
            }
            ClientMessage::Broadcast { message, admin_key } => {
                if self.is_authorized(admin_key.as_deref()) {
                    tracing::info!("Admin broadcast from '{}': {}", sender.id(), message);
                    self.hub
                        .broadcast_to_all(&ServerMessage::admin_broadcast(message))
                        .await;
                    Ok(())
                } else {
                    tracing::warn!("Unauthorized broadcast attempt from '{}'", sender.id());
                    self.hub
                        .send_to(
                            sender,
                            &ServerMessage::error("Unauthorized broadcast attempt"),
                        )
                        .await
                }
            }
        }
    }

    /// 解釈できなかったメッセージに対してエラーを返信
    pub async fn execute_invalid(
        &self,
        sender: &Connection,
        error: ClientMessageError,
    ) -> Result<(), SendError> {
        tracing::warn!("Rejected message from '{}': {}", sender.id(), error);
        self.hub
            .send_to(sender, &ServerMessage::error(error.to_string()))
            .await
    }

    fn is_authorized(&self, provided: Option<&str>) -> bool {
        match (self.admin_key.as_deref(), provided) {
            (Some(expected), Some(provided)) => expected == provided,
            _ => false,
        }
    }
}
