//! Every message the bot shows, as HTML text plus keyboard.

use crate::achievement::{ticket_bar, tier_transition, AchievementTier, TICKET_GOAL};
use crate::actions::{Action, StartPayload};
use crate::affiliate::MIN_WITHDRAWAL;
use crate::catalog::{self, Book};
use crate::models::{LeaderboardEntry, PayoutRequest, Referrer, UserProfile};
use crate::view::{escape_html, format_amount, Keyboard, Screen};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━";
const DRAW_PRIZE: &str = "КОМБО-экосистема (120 000 ₽)";

/// Public addresses the screens link to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
    pub bot_username: String,
    pub webapp_url: String,
}

impl Links {
    pub fn new(bot_username: impl Into<String>, webapp_url: impl Into<String>) -> Self {
        Self {
            bot_username: bot_username.into(),
            webapp_url: webapp_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn gift_link(&self, gifter_id: i64, book_id: &str) -> String {
        format!(
            "https://t.me/{}?start={}",
            self.bot_username,
            StartPayload::gift_link_payload(gifter_id, book_id)
        )
    }

    pub fn partner_link(&self, ref_code: &str) -> String {
        format!("https://t.me/{}/app?startapp=ref_{}", self.bot_username, ref_code)
    }

    pub fn roulette_url(&self) -> String {
        format!("{}?screen=roulette", self.webapp_url)
    }

    pub fn cabinet_url(&self, ref_code: &str) -> String {
        format!("{}?startapp=partner_{}", self.webapp_url, ref_code)
    }

    pub fn share_url(url: &str, text: &str) -> String {
        format!(
            "https://t.me/share/url?url={}&text={}",
            urlencoding::encode(url),
            urlencoding::encode(text)
        )
    }
}

fn display_name(name: Option<&str>, fallback: &str) -> String {
    match name.map(str::trim) {
        Some(n) if !n.is_empty() => escape_html(n),
        _ => fallback.to_string(),
    }
}

fn gift_default() -> Action {
    Action::Gift(catalog::DEFAULT_BOOK_ID.to_string())
}

pub fn main_menu_keyboard(links: &Links) -> Keyboard {
    Keyboard::new()
        .action("📖 Забрать книгу", Action::GetBook)
        .action("🎰 Рулетка", Action::OpenRoulette)
        .row()
        .web_app("🤖 Mini App", links.webapp_url.clone())
        .row()
        .action("📊 Профиль", Action::MyProfile)
        .action("🏆 Топ", Action::Leaderboard)
        .row()
        .action("🤝 Стать партнёром", Action::BecomePartner)
}

fn back_to_menu() -> Keyboard {
    Keyboard::new().action("« Меню", Action::MainMenu)
}

pub fn welcome(links: &Links, first_name: Option<&str>) -> Screen {
    let text = format!(
        "✨ <b>Добро пожаловать, {}!</b>\n\n\
         Я — бот Игоря Иванова, эксперта по продажам и ИИ-решениям.\n\n\
         Что здесь есть:\n\
         📚 Бесплатные бизнес-книги\n\
         📋 Чек-лист «5 точек роста» в подарок\n\
         🎰 Рулетка призов\n\
         🎁 Розыгрыш КОМБО-экосистемы (120 000 ₽)\n\n\
         Заберите книгу + бонусы 👇",
        display_name(first_name, "друг")
    );
    Screen::new(text, main_menu_keyboard(links))
}

pub fn welcome_group(links: &Links, first_name: Option<&str>) -> Screen {
    let text = format!(
        "👋 <b>{}, добро пожаловать из группы!</b>\n\n\
         Эксклюзивно для подписчиков бота:\n\
         📚 Книги бесплатно\n\
         📋 Чек-лист «5 точек роста»\n\
         🎰 Рулетка подарков\n\
         🎁 Розыгрыш КОМБО (120 000 ₽)\n\n\
         Забирайте 👇",
        display_name(first_name, "друг")
    );
    let keyboard = Keyboard::new()
        .action("📖 Забрать книгу + бонусы", Action::GetBook)
        .row()
        .action("🎰 Рулетка", Action::OpenRoulette)
        .row()
        .web_app("🤖 Mini App", links.webapp_url.clone());
    Screen::new(text, keyboard)
}

pub fn main_menu(links: &Links) -> Screen {
    Screen::new("✨ <b>Главное меню</b>\n\nВыберите:", main_menu_keyboard(links))
}

pub fn choose_action(links: &Links) -> Screen {
    Screen::new("Выберите действие 👇", main_menu_keyboard(links))
}

pub fn gift_landing(viewer_name: Option<&str>, gifter_id: i64, book: &Book) -> Screen {
    let text = format!(
        "🎁 <b>{name}, вам подарили книгу!</b>\n\n\
         {emoji} <b>«{title}»</b>\n\
         <i>{author}</i>\n\n\
         {description}\n\n\
         {RULE}\n\n\
         Подпишитесь и заберите <b>3 подарка:</b>\n\n\
         📖 Книга «{title}» (PDF)\n\
         📋 Чек-лист «5 точек роста бизнеса»\n\
         🎰 Бесплатный спин рулетки призов\n\n\
         Один клик — и всё ваше 👇",
        name = display_name(viewer_name, "Привет"),
        emoji = book.emoji,
        title = book.title,
        author = book.author,
        description = book.description,
    );
    let keyboard = Keyboard::new()
        .action(
            "✅ Подписаться и забрать всё!",
            Action::Subscribe {
                gifter_id,
                book_id: book.id.to_string(),
            },
        )
        .row()
        .action("ℹ️ Что это за бот?", Action::AboutBot);
    Screen::new(text, keyboard)
}

/// The three rewards shown once a gift link subscription goes through.
pub fn subscription_fulfilled(links: &Links, book: &Book) -> Screen {
    let text = format!(
        "🎉 <b>Вы подписаны! Вот ваши 3 подарка:</b>\n\n\
         {RULE}\n\n\
         <b>📖 1/3 — Книга</b>\n\
         {} «{}»\n\n\
         <b>📋 2/3 — Чек-лист</b>\n\
         «5 точек роста бизнеса»\n\n\
         <b>🎰 3/3 — Спин рулетки</b>\n\
         Выиграйте подарок от Игоря!\n\n\
         Забирайте по порядку 👇",
        book.emoji, book.title
    );
    let keyboard = Keyboard::new()
        .action("📥 1. Скачать книгу", Action::Download(book.id.to_string()))
        .row()
        .action("📋 2. Получить чек-лист", Action::SendChecklist)
        .row()
        .web_app("🎰 3. Крутить рулетку!", links.roulette_url())
        .row()
        .action("🎁 Подарить книгу другу = +1 🎟", Action::Gift(book.id.to_string()));
    Screen::new(text, keyboard)
}

pub fn about_bot() -> Screen {
    let text = "ℹ️ <b>Бот Игоря Иванова</b>\n\n\
                Игорь — бизнес-консультант, 15+ лет в продажах и партнёрствах.\n\n\
                <b>Бесплатно:</b>\n\
                📚 Библиотека бизнес-книг\n\
                📋 Чек-листы и гайды\n\
                🤖 ИИ-калькуляторы\n\
                🎰 Рулетка с реальными призами\n\n\
                <b>Не будет:</b>\n\
                ❌ Спама (макс 2-3 сообщения/неделю)\n\
                ❌ Продаж в лоб\n\n\
                <i>Отписаться можно в любой момент.</i>";
    Screen::new(text, Keyboard::new().action("« Назад", Action::MainMenu))
}

/// Message to the gifter after a friend subscribed. `profile` is the gifter's
/// row as re-read after the ledger write; a missing row renders as zeros.
pub fn gifter_notice(profile: Option<&UserProfile>, book: &Book, receiver_name: &str) -> Screen {
    let tickets = profile.map(|p| p.total_tickets).unwrap_or(0);
    let gifts = profile.map(|p| p.total_gifts).unwrap_or(0);
    let recorded = profile.map(|p| p.achievement_tier).unwrap_or_default();

    let mut text = format!(
        "🎟 <b>+1 билет!</b>\n\n\
         <b>{}</b> подписался и забрал «{}»!\n\n\
         {} <b>{}</b> из {}\n",
        display_name(Some(receiver_name), "Друг"),
        book.title,
        ticket_bar(tickets),
        tickets,
        TICKET_GOAL
    );

    if tickets < TICKET_GOAL {
        text.push_str(&format!(
            "\nЕщё <b>{}</b> — и вы в розыгрыше КОМБО! 🎰",
            TICKET_GOAL - tickets
        ));
    } else {
        text.push_str("\n✅ <b>Вы в розыгрыше!</b> Больше билетов = выше шанс 🔥");
    }

    if let Some(tier) = tier_transition(recorded, gifts) {
        text.push_str(&format!("\n\n🏆 <b>Ачивка: {} {}!</b>", tier.emoji(), tier.title()));
        if let Some(bonus) = tier.bonus_tickets() {
            text.push_str(&format!(" +{} 🎟", bonus));
        }
    }

    let keyboard = Keyboard::new()
        .action("🎁 Подарить ещё", Action::Gift(book.id.to_string()))
        .action("🏆 Топ", Action::Leaderboard);
    Screen::new(text, keyboard)
}

pub fn book_of_month(book: &Book) -> Screen {
    let text = format!(
        "📖 <b>Книга месяца:</b>\n\n\
         {} <b>«{}»</b>\n<i>{}</i>\n\n{}\n\n\
         {RULE}\n\n\
         🎁 Подарите другу = 🎟 билет на розыгрыш КОМБО!\n{} билетов = участие",
        book.emoji, book.title, book.author, book.description, TICKET_GOAL
    );
    let keyboard = Keyboard::new()
        .action("📥 Скачать PDF", Action::Download(book.id.to_string()))
        .row()
        .action("🎁 Подарить другу = +1 🎟", Action::Gift(book.id.to_string()))
        .row()
        .action("📋 Чек-лист «5 точек роста»", Action::SendChecklist)
        .row()
        .action("🎟 Мои билеты", Action::MyTickets)
        .action("🏆 Топ", Action::Leaderboard)
        .row()
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

pub fn download_pending(links: &Links, book: &Book) -> Screen {
    let text = format!(
        "📥 <b>«{}»</b>\n\n\
         ⏳ PDF загружается — отправим сюда автоматически.\n\n\
         А пока — заберите остальные подарки 👇",
        book.title
    );
    let keyboard = Keyboard::new()
        .action("📋 Чек-лист «5 точек роста»", Action::SendChecklist)
        .row()
        .web_app("🎰 Крутить рулетку", links.roulette_url())
        .row()
        .action("🎁 Подарить книгу другу", Action::Gift(book.id.to_string()))
        .row()
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

pub fn checklist() -> Screen {
    let text = format!(
        "📋 <b>5 точек роста вашего бизнеса</b>\n\
         <i>Чек-лист от Игоря Иванова</i>\n\n\
         {RULE}\n\n\
         <b>1. 🔄 Партнёрские продажи</b>\n\
         Сколько партнёров приводят вам клиентов?\n\
         • 0 — вы теряете самый дешёвый канал\n\
         • 1-3 — начало, но нет системы\n\
         • 5+ — вы в топ-10% бизнесов\n\
         → <i>Посчитайте ROI в калькуляторе партнёрств</i>\n\n\
         <b>2. 🤖 Автоматизация первого контакта</b>\n\
         Кто отвечает клиенту в нерабочее время?\n\
         • Никто — теряете до 40% обращений\n\
         • Автоответчик — не продаёт\n\
         • ИИ-чатбот — отвечает, записывает 24/7\n\
         → <i>Считайте экономию в калькуляторе «ИИ vs Человек»</i>\n\n\
         <b>3. 📞 Реактивация базы</b>\n\
         Когда звонили «спящим» клиентам?\n\
         • Никогда — в базе спрятана выручка на 2-3 мес\n\
         • Вручную — дорого, менеджеры саботируют\n\
         • Голосовой робот — 200 звонков/день, ₽1.5/звонок\n\
         → <i>Крутите рулетку — выиграйте 3 тестовых звонка!</i>\n\n\
         <b>4. 🎯 Конверсия отдела продаж</b>\n\
         Какой % лидов → сделки?\n\
         • &lt;10% — серьёзные проблемы\n\
         • 10-20% — средний рынок, можно ×2\n\
         • 20%+ — фокус на масштаб\n\
         → <i>Пройдите аудит лидерства — 8 вопросов</i>\n\n\
         <b>5. 💰 Стоимость привлечения (CAC)</b>\n\
         Знаете свой CAC по каналам?\n\
         • Не считаю — летите вслепую\n\
         • Общий — нет понимания что работает\n\
         • По каналам — можете масштабировать\n\
         → <i>Партнёры дают CAC в 3-5 раз ниже рекламы</i>\n\n\
         {RULE}\n\n\
         <b>Сколько из 5 закрыты?</b>\n\
         🔴 0-1 — бизнес недозарабатывает 30-50%\n\
         🟡 2-3 — есть рост, но много дыр\n\
         🟢 4-5 — отличная форма!"
    );
    Screen::text_only(text)
}

pub fn checklist_follow_up(links: &Links) -> Screen {
    let text = "👆 <b>Проверили точки роста?</b>\n\n\
                Теперь:\n\
                🎰 <b>Крутите рулетку</b> — выиграйте подарок\n\
                🤖 <b>Пройдите калькуляторы</b> — посчитайте ROI\n\n\
                И подарите книгу другу — получите 🎟 билет!";
    let keyboard = Keyboard::new()
        .web_app("🎰 Крутить рулетку!", links.roulette_url())
        .row()
        .web_app("🤖 Калькуляторы", links.webapp_url.clone())
        .row()
        .action("🎁 Подарить книгу = +1 🎟", gift_default())
        .row()
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

pub fn gift_share(links: &Links, sender_id: i64, book: &Book) -> Screen {
    let url = links.gift_link(sender_id, book.id);
    let share_text = format!(
        "📚 Дарю тебе книгу «{}» от эксперта Игоря Иванова!\n\n\
         🎁 Внутри: книга + чек-лист + спин рулетки!\n\nЗабирай:",
        book.title
    );
    let text = format!(
        "🎁 <b>Подарите книгу = 🎟 билет</b>\n\n\
         {} «{}»\n\n\
         Ваша ссылка:\n<code>{}</code>\n\n\
         📤 Отправьте другу. Когда он <b>подпишется</b> — вы получите 🎟\n\n\
         Друг получит <b>3 подарка:</b>\n\
         📖 Книгу  📋 Чек-лист  🎰 Рулетку\n\n\
         <i>🎟×{} = розыгрыш {}</i>",
        book.emoji,
        book.title,
        escape_html(&url),
        TICKET_GOAL,
        DRAW_PRIZE
    );
    let keyboard = Keyboard::new()
        .url("📤 Отправить в Telegram", Links::share_url(&url, &share_text))
        .row()
        .action("📖 Другую книгу", Action::BookList)
        .row()
        .action("🎟 Мои билеты", Action::MyTickets)
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

pub fn library() -> Screen {
    let mut text = String::from("📚 <b>Библиотека</b>\n\nВыберите для подарка:\n\n");
    let mut keyboard = Keyboard::new();
    for book in catalog::books() {
        text.push_str(&format!("{} «{}» — <i>{}</i>\n", book.emoji, book.title, book.author));
        keyboard = keyboard
            .action(format!("{} {}", book.emoji, book.title), Action::Gift(book.id.to_string()))
            .row();
    }
    Screen::new(text, keyboard.action("« Меню", Action::MainMenu))
}

pub fn tickets(profile: Option<&UserProfile>) -> Screen {
    let tickets = profile.map(|p| p.total_tickets).unwrap_or(0);
    let gifts = profile.map(|p| p.total_gifts).unwrap_or(0);
    let tier = AchievementTier::for_gifts(gifts);

    let status = if tickets < TICKET_GOAL {
        format!("Ещё <b>{}</b> 🎟 для участия!", TICKET_GOAL - tickets)
    } else {
        "✅ <b>Вы участвуете!</b>".to_string()
    };
    let text = format!(
        "🎟 <b>Билеты на розыгрыш</b>\n\n\
         {}\n\n\
         Билетов: <b>{}</b>\nПодарено: <b>{}</b> 📚\nАчивка: {} {}\n\n\
         {}\n\n\
         🏆 Приз: {}",
        ticket_bar(tickets),
        tickets,
        gifts,
        tier.emoji(),
        tier.title(),
        status,
        DRAW_PRIZE
    );
    let keyboard = Keyboard::new()
        .action("🎁 Подарить = +1 🎟", gift_default())
        .row()
        .action("🏆 Топ", Action::Leaderboard)
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

pub fn profile(first_name: &str, last_name: Option<&str>, profile: Option<&UserProfile>) -> Screen {
    let tickets = profile.map(|p| p.total_tickets).unwrap_or(0);
    let gifts = profile.map(|p| p.total_gifts).unwrap_or(0);
    let tier = AchievementTier::for_gifts(gifts);

    let mut text = format!(
        "📊 <b>Профиль</b>\n\n\
         👤 {} {}\n\
         {} <b>{}</b>\n\n\
         📚 Подарено: <b>{}</b>\n🎟 Билетов: <b>{}</b>\n",
        escape_html(first_name),
        escape_html(last_name.unwrap_or("")),
        tier.emoji(),
        tier.title(),
        gifts,
        tickets
    );

    if let Some(next) = tier.next() {
        text.push_str(&format!(
            "\n📈 До {} {}: ещё <b>{}</b>\n",
            next.emoji(),
            next.title(),
            next.min_gifts().saturating_sub(gifts)
        ));
    }

    text.push_str(&format!("\n{RULE}\n\n"));
    let table: Vec<String> = AchievementTier::ALL
        .iter()
        .map(|t| match t.bonus_tickets() {
            Some(bonus) => format!("{} {} — {} (+{}🎟)", t.emoji(), t.title(), t.min_gifts(), bonus),
            None => format!("{} {} — старт", t.emoji(), t.title()),
        })
        .collect();
    text.push_str(&table.join("\n"));

    let keyboard = Keyboard::new()
        .action("🎁 Подарить книгу", gift_default())
        .row()
        .action("🏆 Топ", Action::Leaderboard)
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

/// `entries` is `None` when the ranking could not be fetched.
pub fn leaderboard(entries: Option<&[LeaderboardEntry]>) -> Screen {
    const MEDALS: [&str; 3] = ["👑", "🥈", "🥉"];

    let mut text = String::from("🏆 <b>Топ дарителей</b>\n\n");
    match entries {
        Some(entries) if !entries.is_empty() => {
            for (i, entry) in entries.iter().enumerate() {
                let place = MEDALS
                    .get(i)
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("<b>{}.</b>", i + 1));
                text.push_str(&format!(
                    "{} {} {} — <b>{}</b> 📚 (<b>{}</b> 🎟)\n",
                    place,
                    display_name(entry.first_name.as_deref(), "Аноним"),
                    entry.achievement_level.emoji(),
                    entry.total_gifts,
                    entry.total_tickets
                ));
            }
        }
        Some(_) => text.push_str("<i>Пока пусто!</i>\n"),
        None => text.push_str("<i>Загрузка...</i>\n"),
    }
    text.push_str(&format!("\n{RULE}\nПодарите книгу → в топ → бонусные 🎟"));

    let keyboard = Keyboard::new()
        .action("🎁 Подарить книгу", gift_default())
        .row()
        .action("📊 Профиль", Action::MyProfile)
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

pub fn roulette(links: &Links) -> Screen {
    let text = "🎰 <b>Рулетка подарков</b>\n\n\
                Призы:\n\
                🎯 Стратсессия 45мин (25 000₽)\n\
                🔥 Скидка 30 000₽ на КОМБО\n\
                🎁 Месяц сопровождения\n\
                🤖 ИИ-аудит бизнеса\n\
                💬 Демо чатбота\n\
                📞 3 тест-звонка\n\
                ⭐ Скидка 15%\n\
                💎 VIP-бонус\n\n\
                Крутите в Mini App 👇";
    let keyboard = Keyboard::new()
        .web_app("🎰 Крутить!", links.roulette_url())
        .row()
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

pub fn partner_program(links: &Links, referrer: &Referrer) -> Screen {
    let partner_link = links.partner_link(&referrer.ref_code);
    let rate = format_amount(referrer.commission_rate);
    let text = format!(
        "🤝 <b>Партнёрская программа</b>\n\n\
         Код: <code>{code}</code>\nУровень: {level} ({rate}%)\n\n\
         <b>Как работает:</b>\n1. Делитесь ссылкой\n2. Друзья покупают\n3. Вы получаете {rate}%\n\n\
         <b>Уровни:</b>\n🟢 Start 10%\n🔵 Партнёр 15% (3+)\n🟣 VIP 20% (10+)\n\n\
         Ссылка:\n<code>{link}</code>",
        code = escape_html(&referrer.ref_code),
        level = referrer.level.label(),
        rate = rate,
        link = escape_html(&partner_link),
    );
    let keyboard = Keyboard::new()
        .web_app("📊 Кабинет", links.cabinet_url(&referrer.ref_code))
        .row()
        .url(
            "📤 Поделиться",
            Links::share_url(&partner_link, "Рекомендую эксперта по продажам — Игоря Иванова"),
        )
        .row()
        .action("📈 Стата", Action::PartnerStats)
        .action("💰 Баланс", Action::PartnerBalance)
        .row()
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

pub fn partner_error() -> Screen {
    Screen::new("Ошибка.", back_to_menu())
}

pub fn not_a_partner(with_menu: bool) -> Screen {
    let mut keyboard = Keyboard::new().action("🤝 Стать", Action::BecomePartner);
    if with_menu {
        keyboard = keyboard.action("« Меню", Action::MainMenu);
    }
    Screen::new("Вы не партнёр.", keyboard)
}

pub fn partner_stats(links: &Links, referrer: &Referrer) -> Screen {
    let text = format!(
        "📈 <b>Статистика</b>\n\n👆 {}\n👤 {}\n💰 {}\n💵 {} ₽\n\nБаланс: <b>{} ₽</b>",
        referrer.total_clicks,
        referrer.total_leads,
        referrer.total_conversions,
        format_amount(referrer.total_earned),
        format_amount(referrer.balance)
    );
    let keyboard = Keyboard::new()
        .action("💰 Вывести", Action::PartnerWithdraw)
        .row()
        .web_app("📊 Кабинет", links.cabinet_url(&referrer.ref_code))
        .row()
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

pub fn partner_balance(referrer: &Referrer) -> Screen {
    let status = if referrer.balance >= MIN_WITHDRAWAL {
        "✅ Можно вывести".to_string()
    } else {
        format!(
            "⏳ Мин: {}₽ (ещё {}₽)",
            format_amount(MIN_WITHDRAWAL),
            format_amount(MIN_WITHDRAWAL - referrer.balance)
        )
    };
    let text = format!(
        "💰 <b>Баланс</b>\n\nК выводу: <b>{} ₽</b>\nВсего: <b>{} ₽</b>\n\n{}",
        format_amount(referrer.balance),
        format_amount(referrer.total_earned),
        status
    );
    let keyboard = Keyboard::new()
        .action("💰 Вывести", Action::PartnerWithdraw)
        .row()
        .action("📈 Стата", Action::PartnerStats)
        .action("« Меню", Action::MainMenu);
    Screen::new(text, keyboard)
}

pub fn withdrawal_below_minimum(balance: f64, shortfall: f64) -> Screen {
    let text = format!(
        "⚠️ Мин: {}₽\nБаланс: {}₽\nНе хватает: {}₽",
        format_amount(MIN_WITHDRAWAL),
        format_amount(balance),
        format_amount(shortfall)
    );
    Screen::new(text, back_to_menu())
}

pub fn withdrawal_already_pending() -> Screen {
    Screen::new(
        "⏳ <b>Заявка уже в обработке</b>\n\nДождитесь выплаты по текущей заявке.",
        back_to_menu(),
    )
}

pub fn withdrawal_created(payout: &PayoutRequest) -> Screen {
    let text = format!(
        "✅ <b>Заявка создана</b>\n\n{} ₽ • СБП\nОбработаем за 48ч.",
        format_amount(payout.amount)
    );
    Screen::new(text, back_to_menu())
}

pub fn withdrawal_failed() -> Screen {
    Screen::new("⚠️ Не удалось создать заявку. Попробуйте позже.", back_to_menu())
}
