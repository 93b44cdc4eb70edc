//! UseCase 層
//!
//! クライアントから届いたメッセージを解釈し、BroadcastHub の操作に変換するレイヤー。
//! UI 層から呼び出されます。

pub mod handle_client_message;

pub use handle_client_message::HandleClientMessageUseCase;
