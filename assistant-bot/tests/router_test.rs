//! Router integration tests: the full handler chain driven with fake messages, a [`MockBot`] for
//! Telegram, a [`MockLlm`] for the model and mockito servers for the data feeds.

mod common;

use assistant_bot::handlers::{
    about_text, CLEARED_TEXT, EMPTY_INPUT_TEXT, HELP_TEXT, START_TEXT, TOO_LONG_TEXT,
    UNKNOWN_COMMAND_TEXT,
};
use assistant_bot::{build_handler_chain, AssistantConfig, AssistantServices};
use common::mock_bot::MockBot;
use common::mock_llm::MockLlm;
use conversation::ConversationStore;
use data_feeds::{ExchangeRateClient, WeatherClient};
use gigachat_client::GigaChatConfig;
use mockito::{Matcher, ServerGuard};
use prompt::{ChatMessage, MessageRole};
use std::sync::Arc;
use telegram_bot::{Chat, ChatKind, HandlerChain, HandlerResponse, Message, TelegramConfig, User};
use tokio::sync::RwLock;

const BOT_USERNAME: &str = "family_bot";
const UNREACHABLE: &str = "http://127.0.0.1:1/unreachable";

const CBR_BODY: &str = r#"{"Date":"2024-05-01T11:30:00+03:00","Valute":{"USD":{"CharCode":"USD","Nominal":1,"Value":92.5,"Previous":92.1}}}"#;
const WEATHER_BODY: &str = r#"{"fact":{"temp":-3,"feels_like":-8,"condition":"overcast"}}"#;

fn config(trigger_gating: bool) -> AssistantConfig {
    AssistantConfig {
        telegram: TelegramConfig::with_token("test-token"),
        gigachat: GigaChatConfig::with_credentials("id", "secret"),
        weather_api_key: "weather-key".to_string(),
        weather_url: UNREACHABLE.to_string(),
        cbr_daily_url: UNREACHABLE.to_string(),
        system_prompt: "Ты семейный помощник.".to_string(),
        history_limit: 15,
        max_input_chars: 40,
        trigger_gating,
        trigger_words: vec!["бот".to_string()],
    }
}

struct Harness {
    bot: Arc<MockBot>,
    llm: Arc<MockLlm>,
    store: ConversationStore,
    chain: HandlerChain,
}

fn harness(config: &AssistantConfig, llm: MockLlm) -> Harness {
    let bot = Arc::new(MockBot::new());
    let llm = Arc::new(llm);
    let store = ConversationStore::new(config.history_limit);
    let services = AssistantServices {
        llm: llm.clone(),
        store: store.clone(),
        weather: WeatherClient::new(config.weather_api_key.clone())
            .unwrap()
            .with_url(config.weather_url.clone()),
        exchange: ExchangeRateClient::new()
            .unwrap()
            .with_url(config.cbr_daily_url.clone()),
    };
    let username = Arc::new(RwLock::new(Some(BOT_USERNAME.to_string())));
    let chain = build_handler_chain(config, services, bot.clone(), username).unwrap();
    Harness {
        bot,
        llm,
        store,
        chain,
    }
}

fn private(text: &str) -> Message {
    Message::text("1", User::new(42, Some("alice")), Chat::private(42), text)
}

fn group(text: &str) -> Message {
    let chat = Chat {
        id: -100,
        kind: ChatKind::Supergroup,
    };
    Message::text("2", User::new(7, Some("bob")), chat, text)
}

async fn cbr_server() -> ServerGuard {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/daily_json.js")
        .with_status(200)
        .with_header("content-type", "application/javascript")
        .with_body(CBR_BODY)
        .create_async()
        .await;
    server
}

/// **Test: The chat chain has five handlers in the documented order.**
#[tokio::test]
async fn chain_has_all_handlers() {
    let h = harness(&config(false), MockLlm::replying("ok"));
    assert_eq!(h.chain.len(), 5);
}

/// **Test: A plain message goes to the model with the system hint; both turns are stored.**
#[tokio::test]
async fn chat_stores_question_and_answer() {
    let h = harness(&config(false), MockLlm::replying("Привет, Алиса!"));

    let response = h.chain.handle(&private("Привет")).await.unwrap();

    assert_eq!(response, HandlerResponse::Reply("Привет, Алиса!".to_string()));
    assert_eq!(h.bot.texts(), vec!["Привет, Алиса!"]);
    assert_eq!(h.bot.typing_count(), 1);

    let calls = h.llm.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].history, vec![ChatMessage::user("Привет")]);
    assert_eq!(calls[0].system_hint.as_deref(), Some("Ты семейный помощник."));

    assert_eq!(
        h.store.read(42).await,
        vec![
            ChatMessage::user("Привет"),
            ChatMessage::assistant("Привет, Алиса!")
        ]
    );
}

/// **Test: The second question is sent together with the first exchange.**
#[tokio::test]
async fn chat_sends_prior_history() {
    let h = harness(&config(false), MockLlm::replying("ответ"));

    h.chain.handle(&private("первый")).await.unwrap();
    h.chain.handle(&private("второй")).await.unwrap();

    let calls = h.llm.calls();
    assert_eq!(calls.len(), 2);
    let roles: Vec<MessageRole> = calls[1].history.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
    );
    assert_eq!(calls[1].history[2].content, "второй");
}

/// **Test: A failed completion is reported to the user; only the question stays in history.**
#[tokio::test]
async fn completion_error_keeps_only_question() {
    let h = harness(&config(false), MockLlm::failing(503));

    h.chain.handle(&private("Как дела?")).await.unwrap();

    let texts = h.bot.texts();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("503"));
    assert!(!texts[0].contains("upstream failure"));
    assert_eq!(h.store.read(42).await, vec![ChatMessage::user("Как дела?")]);
}

/// **Test: A message that is only a mention has no question; the model is not called.**
#[tokio::test]
async fn empty_question_is_rejected() {
    let h = harness(&config(false), MockLlm::replying("unused"));

    h.chain.handle(&private("@family_bot")).await.unwrap();

    assert_eq!(h.bot.texts(), vec![EMPTY_INPUT_TEXT]);
    assert!(h.llm.calls().is_empty());
    assert!(h.store.is_empty(42).await);
}

/// **Test: Input over the length limit is rejected before anything is stored.**
#[tokio::test]
async fn too_long_question_is_rejected() {
    let h = harness(&config(false), MockLlm::replying("unused"));

    h.chain.handle(&private(&"я".repeat(41))).await.unwrap();

    assert_eq!(h.bot.texts(), vec![TOO_LONG_TEXT]);
    assert!(h.llm.calls().is_empty());
    assert!(h.store.is_empty(42).await);
}

/// **Test: Exactly the limit is still accepted (limit counts chars, not bytes).**
#[tokio::test]
async fn question_at_limit_is_accepted() {
    let h = harness(&config(false), MockLlm::replying("ok"));

    h.chain.handle(&private(&"я".repeat(40))).await.unwrap();

    assert_eq!(h.llm.calls().len(), 1);
}

/// **Test: Rate questions are answered from the CBR feed without the model or history.**
#[tokio::test]
async fn exchange_rate_bypasses_model() {
    let server = cbr_server().await;
    let mut cfg = config(false);
    cfg.cbr_daily_url = format!("{}/daily_json.js", server.url());
    let h = harness(&cfg, MockLlm::replying("unused"));

    h.chain.handle(&private("Какой сегодня курс доллара?")).await.unwrap();

    assert_eq!(h.bot.texts(), vec!["💵 Курс USD ЦБ РФ: 92.50 ₽ ⬆️ +0.40"]);
    assert!(h.llm.calls().is_empty());
    assert!(h.store.is_empty(42).await);
}

/// **Test: A feed outage becomes an error line, still without the model.**
#[tokio::test]
async fn exchange_rate_outage_reports_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/daily_json.js")
        .with_status(502)
        .create_async()
        .await;
    let mut cfg = config(false);
    cfg.cbr_daily_url = format!("{}/daily_json.js", server.url());
    let h = harness(&cfg, MockLlm::replying("unused"));

    h.chain.handle(&private("usd")).await.unwrap();

    assert_eq!(
        h.bot.texts(),
        vec!["❌ Ошибка получения курса: сервис вернул код 502"]
    );
    assert!(h.llm.calls().is_empty());
}

/// **Test: When both patterns match, the exchange rate handler wins.**
#[tokio::test]
async fn exchange_rate_takes_precedence_over_weather() {
    let server = cbr_server().await;
    let mut cfg = config(false);
    cfg.cbr_daily_url = format!("{}/daily_json.js", server.url());
    let h = harness(&cfg, MockLlm::replying("unused"));

    h.chain.handle(&private("погода и курс usd")).await.unwrap();

    assert_eq!(h.bot.texts().len(), 1);
    assert!(h.bot.texts()[0].starts_with("💵"));
    assert!(h.llm.calls().is_empty());
}

/// **Test: Weather is narrated by the model from a one-off prompt; history is untouched.**
#[tokio::test]
async fn weather_is_narrated_without_history() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v2/forecast")
        .match_header("x-yandex-weather-key", "weather-key")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(WEATHER_BODY)
        .create_async()
        .await;
    let mut cfg = config(false);
    cfg.weather_url = format!("{}/v2/forecast", server.url());
    let h = harness(&cfg, MockLlm::replying("Морозно, оденьтесь теплее."));

    h.chain.handle(&private("Какая сегодня Погода?")).await.unwrap();

    assert_eq!(h.bot.texts(), vec!["Морозно, оденьтесь теплее."]);
    let calls = h.llm.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].history.len(), 1);
    let prompt = &calls[0].history[0].content;
    assert!(prompt.contains("Липецк"));
    assert!(prompt.contains("-3"));
    assert!(prompt.contains("пасмурно"));
    assert!(h.store.is_empty(42).await);
    mock.assert_async().await;
}

/// **Test: A weather outage is reported directly and the model is never called.**
#[tokio::test]
async fn weather_outage_skips_model() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/forecast")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    let mut cfg = config(false);
    cfg.weather_url = format!("{}/v2/forecast", server.url());
    let h = harness(&cfg, MockLlm::replying("unused"));

    h.chain.handle(&private("погода")).await.unwrap();

    assert_eq!(
        h.bot.texts(),
        vec!["❌ Ошибка получения погоды: сервис вернул код 500"]
    );
    assert!(h.llm.calls().is_empty());
}

/// **Test: With gating on, unaddressed group chatter is dropped silently.**
#[tokio::test]
async fn gating_drops_unaddressed_group_messages() {
    let h = harness(&config(true), MockLlm::replying("unused"));

    let response = h.chain.handle(&group("всем привет")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert!(h.bot.sent().is_empty());
    assert!(h.llm.calls().is_empty());
}

/// **Test: With gating on, a trigger phrase or mention passes and is stripped from the question.**
#[tokio::test]
async fn gating_passes_addressed_group_messages() {
    let h = harness(&config(true), MockLlm::replying("ответ"));

    h.chain.handle(&group("Бот, что приготовить?")).await.unwrap();
    h.chain
        .handle(&group("@family_bot сколько лет Луне?"))
        .await
        .unwrap();

    let calls = h.llm.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].history[0].content, "что приготовить?");
    assert_eq!(calls[1].history.last().unwrap().content, "сколько лет Луне?");
}

/// **Test: With gating on, a reply to the bot counts as addressed.**
#[tokio::test]
async fn gating_passes_replies_to_bot() {
    let h = harness(&config(true), MockLlm::replying("ответ"));
    let message = group("а подробнее?").replying_to("10", Some(BOT_USERNAME), true);

    h.chain.handle(&message).await.unwrap();

    assert_eq!(h.llm.calls().len(), 1);
}

/// **Test: With gating on, private chats are never gated.**
#[tokio::test]
async fn gating_ignores_private_chats() {
    let h = harness(&config(true), MockLlm::replying("ответ"));

    h.chain.handle(&private("просто вопрос")).await.unwrap();

    assert_eq!(h.llm.calls().len(), 1);
}

/// **Test: With gating off, every group message is answered.**
#[tokio::test]
async fn gating_off_answers_all_group_messages() {
    let h = harness(&config(false), MockLlm::replying("ответ"));

    h.chain.handle(&group("всем привет")).await.unwrap();

    assert_eq!(h.bot.texts(), vec!["ответ"]);
}

/// **Test: /start, /help and /about answer with fixed texts and never reach the model.**
#[tokio::test]
async fn fixed_commands() {
    let h = harness(&config(false), MockLlm::replying("unused"));

    h.chain.handle(&private("/start")).await.unwrap();
    h.chain.handle(&private("/help")).await.unwrap();
    h.chain.handle(&private("/about@family_bot")).await.unwrap();

    assert_eq!(
        h.bot.texts(),
        vec![START_TEXT.to_string(), HELP_TEXT.to_string(), about_text(15)]
    );
    assert!(h.llm.calls().is_empty());
}

/// **Test: /clear empties only the sender's history.**
#[tokio::test]
async fn clear_resets_history() {
    let h = harness(&config(false), MockLlm::replying("ответ"));
    h.chain.handle(&private("привет")).await.unwrap();
    h.store.append(99, MessageRole::User, "чужое").await;
    assert_eq!(h.store.len(42).await, 2);

    h.chain.handle(&private("/clear")).await.unwrap();

    assert!(h.store.is_empty(42).await);
    assert_eq!(h.store.len(99).await, 1);
    assert_eq!(h.bot.texts().last().unwrap(), CLEARED_TEXT);
}

/// **Test: Commands addressed to another bot are ignored, even with gating off.**
#[tokio::test]
async fn command_for_other_bot_is_ignored() {
    let h = harness(&config(false), MockLlm::replying("unused"));

    let response = h.chain.handle(&group("/help@weather_bot")).await.unwrap();

    assert_eq!(response, HandlerResponse::Stop);
    assert!(h.bot.sent().is_empty());
}

/// **Test: Unknown commands get a hint in private chats and are ignored in groups.**
#[tokio::test]
async fn unknown_command() {
    let h = harness(&config(false), MockLlm::replying("unused"));

    h.chain.handle(&private("/weather")).await.unwrap();
    assert_eq!(h.bot.texts(), vec![UNKNOWN_COMMAND_TEXT]);

    h.chain.handle(&group("/weather")).await.unwrap();
    assert_eq!(h.bot.texts().len(), 1);
    assert!(h.llm.calls().is_empty());
}

/// **Test: A reply longer than one Telegram message is sent in several parts.**
#[tokio::test]
async fn long_reply_is_split() {
    let long = "а".repeat(4096 + 10);
    let h = harness(&config(false), MockLlm::replying(long));

    h.chain.handle(&private("расскажи длинно")).await.unwrap();

    let texts = h.bot.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0].chars().count(), 4096);
    assert_eq!(texts[1].chars().count(), 10);
}
