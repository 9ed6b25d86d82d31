//! HTTP behaviour of [`Telegram`] against a local mockito server.
//!
//! Paths follow the Bot API format `/bot<token>/<method>`; the server URL replaces
//! `https://api.telegram.org` via `with_api_url`.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};
use tgapi_client::types::methods::*;
use tgapi_client::types::{
    ApiResponse, ChatMember, EditedMessage, InlineKeyboardButton, InlineKeyboardMarkup, User,
};
use tgapi_client::{Telegram, TelegramError};

const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

fn path(method: &str) -> String {
    format!("/bot{}/{}", TEST_BOT_TOKEN, method)
}

fn bot(server: &ServerGuard) -> Telegram {
    Telegram::new(TEST_BOT_TOKEN).with_api_url(server.url())
}

fn sent_message() -> Value {
    json!({"message_id": 1, "date": 0, "chat": {"id": 123, "type": "private"}, "text": "hi"})
}

/// Calls every named method once, keeping only the outcome and the expected method name.
async fn call_every_method(bot: &Telegram) -> Vec<(&'static str, Result<(), TelegramError>)> {
    vec![
        ("sendMessage", bot.send_message(&SendMessage::new(123_i64, "hi")).await.map(|_| ())),
        (
            "forwardMessage",
            bot.forward_message(&ForwardMessage::new(456_i64, 123_i64, 1))
                .await
                .map(|_| ()),
        ),
        (
            "editMessageText",
            bot.edit_message_text(&EditMessageText::new(123_i64, 1, "edited"))
                .await
                .map(|_| ()),
        ),
        ("getMe", bot.get_me().await.map(|_| ())),
        ("getWebhookInfo", bot.get_webhook_info().await.map(|_| ())),
        (
            "setWebhook",
            bot.set_webhook(&SetWebhook::new("https://example.org/hook"))
                .await
                .map(|_| ()),
        ),
        (
            "deleteWebhook",
            bot.delete_webhook(&DeleteWebhook::default()).await.map(|_| ()),
        ),
        ("getUpdates", bot.get_updates(&GetUpdates::new()).await.map(|_| ())),
        (
            "setMyCommands",
            bot.set_my_commands(&SetMyCommands::new(vec![tgapi_client::types::BotCommand::new(
                "start", "Start",
            )]))
            .await
            .map(|_| ()),
        ),
        ("getChat", bot.get_chat(&GetChat::new(123_i64)).await.map(|_| ())),
        ("getFile", bot.get_file(&GetFile::new("BQAD")).await.map(|_| ())),
        (
            "getChatAdministrators",
            bot.get_chat_administrators(&GetChatAdministrators::new(-5_i64))
                .await
                .map(|_| ()),
        ),
        (
            "setChatAdministratorCustomTitle",
            bot.set_chat_administrator_custom_title(&SetChatAdministratorCustomTitle::new(
                -5_i64, 7, "mod",
            ))
            .await
            .map(|_| ()),
        ),
        (
            "promoteChatMember",
            bot.promote_chat_member(&PromoteChatMember::new(-5_i64, 7))
                .await
                .map(|_| ()),
        ),
        (
            "setChatTitle",
            bot.set_chat_title(&SetChatTitle::new(-5_i64, "New title"))
                .await
                .map(|_| ()),
        ),
    ]
}

/// **Test: sendMessage round-trips through the mock server.**
///
/// **Expected:** One POST to `/bot<token>/sendMessage` with a JSON body `{chat_id, text}`; the decoded message re-encodes to the exact result.
#[tokio::test]
async fn send_message_end_to_end() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", path("sendMessage").as_str())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"chat_id": 123, "text": "hi"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"ok": true, "result": sent_message()}).to_string())
        .expect(1)
        .create_async()
        .await;

    let message = bot(&server)
        .send_message(&SendMessage::new(123_i64, "hi"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(serde_json::to_value(&message).unwrap(), sent_message());
    assert_eq!(message.message_id, 1);
    assert_eq!(message.text.as_deref(), Some("hi"));
}

/// **Test: Nested payload fields reach the request body.**
///
/// **Expected:** Username chat id, parse mode and inline keyboard serialize into the body; unset options are omitted.
#[tokio::test]
async fn request_body_carries_nested_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", path("sendMessage").as_str())
        .match_body(Matcher::Json(json!({
            "chat_id": "@channel",
            "text": "<b>vote</b>",
            "parse_mode": "HTML",
            "reply_markup": {"inline_keyboard": [[{"text": "Yes", "callback_data": "vote:yes"}]]}
        })))
        .with_status(200)
        .with_body(json!({"ok": true, "result": sent_message()}).to_string())
        .create_async()
        .await;

    let request = SendMessage::new("@channel", "<b>vote</b>")
        .with_parse_mode(ParseMode::Html)
        .with_reply_markup(InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
            "Yes", "vote:yes",
        )]]));
    bot(&server).send_message(&request).await.unwrap();
    mock.assert_async().await;
}

/// **Test: Parameterless methods send an empty body.**
///
/// **Expected:** `getMe` and `getWebhookInfo` POST with the JSON content type and no body bytes.
#[tokio::test]
async fn parameterless_methods_send_empty_body() {
    let mut server = Server::new_async().await;
    let me = json!({"id": 123456789, "is_bot": true, "first_name": "TestBot", "username": "testbot"});
    let get_me = server
        .mock("POST", path("getMe").as_str())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_body(json!({"ok": true, "result": me}).to_string())
        .create_async()
        .await;
    let webhook = server
        .mock("POST", path("getWebhookInfo").as_str())
        .match_body(Matcher::Exact(String::new()))
        .with_status(200)
        .with_body(
            json!({"ok": true, "result": {"url": "", "has_custom_certificate": false, "pending_update_count": 0}})
                .to_string(),
        )
        .create_async()
        .await;

    let bot = bot(&server);
    let user: User = bot.get_me().await.unwrap();
    assert_eq!(user.username.as_deref(), Some("testbot"));
    assert!(!bot.get_webhook_info().await.unwrap().is_set());

    get_me.assert_async().await;
    webhook.assert_async().await;
}

/// **Test: A non-2xx status becomes an Http error.**
///
/// **Expected:** 429 "rate limited" yields `Http { status: 429, body: "rate limited" }` with the status reason in the message.
#[tokio::test]
async fn non_success_status_is_http_error_with_raw_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", path("sendMessage").as_str())
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let err = bot(&server)
        .send_message(&SendMessage::new(123_i64, "hi"))
        .await
        .unwrap_err();

    match &err {
        TelegramError::Http {
            method,
            status,
            status_text,
            body,
        } => {
            assert_eq!(method, "sendMessage");
            assert_eq!(*status, 429);
            assert_eq!(status_text, "Too Many Requests");
            assert_eq!(body, "rate limited");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
    assert_eq!(err.to_string(), "sendMessage: 429: Too Many Requests, rate limited");
}

/// **Test: `ok: false` fails typed calls.**
///
/// **Expected:** Typed methods return `Api` with the error code, method name and `retry_after`.
#[tokio::test]
async fn ok_false_is_api_error_for_typed_calls() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", path("setChatTitle").as_str())
        .with_status(200)
        .with_body(
            json!({
                "ok": false,
                "error_code": 429,
                "description": "Too Many Requests: retry after 3",
                "parameters": {"retry_after": 3}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = bot(&server)
        .set_chat_title(&SetChatTitle::new(-100_i64, "New title"))
        .await
        .unwrap_err();

    assert!(matches!(err, TelegramError::Api { error_code: 429, .. }));
    assert_eq!(err.method(), "setChatTitle");
    assert_eq!(err.retry_after(), Some(3));
}

/// **Test: The raw envelope layer does not interpret `ok`.**
///
/// **Expected:** `request_envelope` returns the `ok: false` envelope unchanged.
#[tokio::test]
async fn request_envelope_passes_ok_false_through() {
    let mut server = Server::new_async().await;
    let body = json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"});
    let _mock = server
        .mock("POST", path("getChat").as_str())
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let envelope: GetChatResult = bot(&server)
        .request_envelope("getChat", Some(&GetChat::new(1_i64)))
        .await
        .unwrap();

    assert_eq!(envelope, ApiResponse::failure(400, "Bad Request: chat not found"));
}

/// **Test: A non-JSON body is a Decode error.**
///
/// **Expected:** `Decode` carries the method name and the raw body text.
#[tokio::test]
async fn malformed_body_is_decode_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", path("getMe").as_str())
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = bot(&server).get_me().await.unwrap_err();
    match err {
        TelegramError::Decode { method, body, .. } => {
            assert_eq!(method, "getMe");
            assert_eq!(body, "<html>gateway</html>");
        }
        other => panic!("expected Decode error, got {:?}", other),
    }
}

/// **Test: `ok: true` without `result` is reported, not panicked on.**
///
/// **Expected:** Returns `MissingResult`.
#[tokio::test]
async fn ok_without_result_is_missing_result() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", path("deleteWebhook").as_str())
        .with_status(200)
        .with_body(r#"{"ok": true}"#)
        .create_async()
        .await;

    let err = bot(&server)
        .delete_webhook(&DeleteWebhook::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TelegramError::MissingResult { .. }));
}

/// **Test: An unreachable host is a Transport error.**
///
/// **Expected:** `is_transport()` holds, the method is `getMe` and the token is absent from the message.
#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let bot = Telegram::new(TEST_BOT_TOKEN).with_api_url("http://127.0.0.1:1");
    let err = bot.get_me().await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.method(), "getMe");
    assert!(!err.to_string().contains(TEST_BOT_TOKEN));
}

/// **Test: Every named method maps a 429 response to an Http error.**
///
/// **Expected:** Each of the 15 calls returns `Http { status: 429, body: "rate limited" }` tagged with its own method name.
#[tokio::test]
async fn every_method_maps_non_success_status_to_http_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(format!(r"^/bot{}/\w+$", TEST_BOT_TOKEN)))
        .with_status(429)
        .with_body("rate limited")
        .expect(15)
        .create_async()
        .await;

    let outcomes = call_every_method(&bot(&server)).await;
    assert_eq!(outcomes.len(), 15);
    for (name, outcome) in outcomes {
        let err = outcome.expect_err(name);
        match &err {
            TelegramError::Http { status, body, .. } => {
                assert_eq!(*status, 429, "{}", name);
                assert_eq!(body, "rate limited", "{}", name);
            }
            other => panic!("{}: expected Http error, got {:?}", name, other),
        }
        assert_eq!(err.method(), name);
        assert_eq!(err.status(), Some(429));
    }
    mock.assert_async().await;
}

/// **Test: Every named method maps a connection failure to a Transport error.**
///
/// **Expected:** Each of the 15 calls returns a transport error tagged with its own method name, without the token in the message.
#[tokio::test]
async fn every_method_maps_unreachable_host_to_transport_error() {
    let bot = Telegram::new(TEST_BOT_TOKEN).with_api_url("http://127.0.0.1:1");

    let outcomes = call_every_method(&bot).await;
    assert_eq!(outcomes.len(), 15);
    for (name, outcome) in outcomes {
        let err = outcome.expect_err(name);
        assert!(err.is_transport(), "{}: expected Transport error, got {:?}", name, err);
        assert_eq!(err.method(), name);
        assert!(!err.to_string().contains(TEST_BOT_TOKEN), "{}", name);
    }
}

/// **Test: Administrator lists decode into ChatMember variants.**
///
/// **Expected:** `creator` maps to `Owner`, `kicked` to `Banned` with its `until_date`.
#[tokio::test]
async fn get_chat_administrators_decodes_members() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", path("getChatAdministrators").as_str())
        .match_body(Matcher::Json(json!({"chat_id": -1001234567890_i64})))
        .with_status(200)
        .with_body(
            json!({
                "ok": true,
                "result": [
                    {"status": "creator", "user": {"id": 1, "is_bot": false, "first_name": "Owner"}, "is_anonymous": false},
                    {"status": "kicked", "user": {"id": 2, "is_bot": false, "first_name": "Spam"}, "until_date": 0}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let members = bot(&server)
        .get_chat_administrators(&GetChatAdministrators::new(-1001234567890_i64))
        .await
        .unwrap();

    assert!(matches!(members[0], ChatMember::Owner(_)));
    assert!(matches!(members[1], ChatMember::Banned(_)));
    assert_eq!(members[1].until_date(), Some(0));
}

/// **Test: Editing an inline message yields the `true` result.**
///
/// **Expected:** `editMessageText` with `inline_message_id` returns `EditedMessage::Inline`.
#[tokio::test]
async fn edit_message_text_inline_returns_true() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", path("editMessageText").as_str())
        .match_body(Matcher::Json(json!({"inline_message_id": "inl-9", "text": "updated"})))
        .with_status(200)
        .with_body(r#"{"ok": true, "result": true}"#)
        .create_async()
        .await;

    let edited = bot(&server)
        .edit_message_text(&EditMessageText::inline("inl-9", "updated"))
        .await
        .unwrap();
    assert!(matches!(edited, EditedMessage::Inline(_)));
}

/// **Test: Boolean-result methods post their payloads to their own paths.**
///
/// **Expected:** Each mock is hit once with the expected body and every call returns `true`.
#[tokio::test]
async fn boolean_methods_post_to_their_paths() {
    let mut server = Server::new_async().await;
    let ok = json!({"ok": true, "result": true}).to_string();
    let mut mocks = Vec::new();
    for (method, body) in [
        ("setWebhook", json!({"url": "https://example.org/hook", "secret_token": "s3cret"})),
        ("setMyCommands", json!({"commands": [{"command": "start", "description": "Start"}]})),
        ("setChatAdministratorCustomTitle", json!({"chat_id": -5, "user_id": 7, "custom_title": "mod"})),
        ("promoteChatMember", json!({"chat_id": -5, "user_id": 7, "can_pin_messages": true})),
    ] {
        mocks.push(
            server
                .mock("POST", path(method).as_str())
                .match_body(Matcher::Json(body))
                .with_status(200)
                .with_body(ok.clone())
                .expect(1)
                .create_async()
                .await,
        );
    }

    let bot = bot(&server);
    assert!(bot
        .set_webhook(&SetWebhook::new("https://example.org/hook").with_secret_token("s3cret"))
        .await
        .unwrap());
    assert!(bot
        .set_my_commands(&SetMyCommands::new(vec![tgapi_client::types::BotCommand::new(
            "start", "Start"
        )]))
        .await
        .unwrap());
    assert!(bot
        .set_chat_administrator_custom_title(&SetChatAdministratorCustomTitle::new(-5_i64, 7, "mod"))
        .await
        .unwrap());
    let mut promote = PromoteChatMember::new(-5_i64, 7);
    promote.can_pin_messages = Some(true);
    assert!(bot.promote_chat_member(&promote).await.unwrap());

    for mock in mocks {
        mock.assert_async().await;
    }
}

/// **Test: getFile resolves a download URL.**
///
/// **Expected:** `file_url` is `<api_url>/file/bot<token>/<file_path>` and matches `File::download_url`.
#[tokio::test]
async fn get_file_and_download_url() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", path("getFile").as_str())
        .match_body(Matcher::Json(json!({"file_id": "BQAD"})))
        .with_status(200)
        .with_body(
            json!({"ok": true, "result": {"file_id": "BQAD", "file_unique_id": "u", "file_path": "documents/file_3.pdf"}})
                .to_string(),
        )
        .create_async()
        .await;

    let bot = bot(&server);
    let file = bot.get_file(&GetFile::new("BQAD")).await.unwrap();
    let file_path = file.file_path.as_deref().unwrap();
    assert_eq!(
        bot.file_url(file_path),
        format!("{}/file/bot{}/documents/file_3.pdf", server.url(), TEST_BOT_TOKEN)
    );
    assert_eq!(file.download_url(bot.api_url(), TEST_BOT_TOKEN), Some(bot.file_url(file_path)));
}

/// **Test: Polled updates feed forwardMessage.**
///
/// **Expected:** getUpdates sends offset/limit/timeout; forwarding the polled message targets its chat and id.
#[tokio::test]
async fn get_updates_and_forward() {
    let mut server = Server::new_async().await;
    let _updates = server
        .mock("POST", path("getUpdates").as_str())
        .match_body(Matcher::Json(json!({"offset": 10, "limit": 5, "timeout": 0})))
        .with_status(200)
        .with_body(json!({"ok": true, "result": [{"update_id": 10, "message": sent_message()}]}).to_string())
        .create_async()
        .await;
    let _forward = server
        .mock("POST", path("forwardMessage").as_str())
        .match_body(Matcher::Json(json!({"chat_id": 456, "from_chat_id": 123, "message_id": 1})))
        .with_status(200)
        .with_body(json!({"ok": true, "result": sent_message()}).to_string())
        .create_async()
        .await;

    let bot = bot(&server);
    let updates = bot
        .get_updates(&GetUpdates::new().with_offset(10).with_limit(5).with_timeout(0))
        .await
        .unwrap();
    assert_eq!(updates.len(), 1);
    let message = updates[0].message.as_ref().unwrap();

    let forwarded = bot
        .forward_message(&ForwardMessage::new(456_i64, &message.chat, message.message_id))
        .await
        .unwrap();
    assert_eq!(forwarded.message_id, 1);
}

/// **Test: Concurrent calls on a cloned client all succeed.**
///
/// **Expected:** Three joined getChat calls hit the mock three times and decode the same chat.
#[tokio::test]
async fn concurrent_calls_share_one_client() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", path("getChat").as_str())
        .with_status(200)
        .with_body(json!({"ok": true, "result": {"id": 9, "type": "group", "title": "G"}}).to_string())
        .expect(3)
        .create_async()
        .await;

    let bot = bot(&server);
    let shared = bot.clone();
    let request = GetChat::new(9_i64);
    let (a, b, c) = tokio::join!(
        bot.get_chat(&request),
        bot.get_chat(&request),
        shared.get_chat(&request)
    );
    assert_eq!(a.unwrap().id, 9);
    assert_eq!(b.unwrap().id, 9);
    assert_eq!(c.unwrap().id, 9);
    mock.assert_async().await;
}
