//! Shareable announcement text for an event, in the three formats the
//! group posts to messaging apps.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::event::{Event, EventStatus};

const GROUP_NAME: &str = "Grupo Escoteiro Pirabeiraba";
const GROUP_TOWN: &str = "Pirabeiraba - Joinville/SC";
const MOTTO: &str = "Sempre Alerta!";

const WEEKDAYS: [&str; 7] = [
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
    "domingo",
];
const WEEKDAYS_SHORT: [&str; 7] = ["seg.", "ter.", "qua.", "qui.", "sex.", "sáb.", "dom."];
const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];
const MONTHS_SHORT: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStyle {
    #[default]
    Full,
    Simple,
    Whatsapp,
}

#[derive(Debug, Default, Deserialize)]
pub struct InviteQuery {
    #[serde(default)]
    pub style: InviteStyle,
}

#[derive(Debug, Serialize)]
pub struct Invite {
    pub invite: String,
    pub style: &'static str,
}

impl InviteStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            InviteStyle::Full => "full",
            InviteStyle::Simple => "simple",
            InviteStyle::Whatsapp => "whatsapp",
        }
    }
}

/// "segunda-feira, 15 de janeiro de 2024"
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {:02} de {} de {}",
        WEEKDAYS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// "15/01/2024"
pub fn numeric_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// "seg., 15 de jan."
pub fn short_date(date: NaiveDate) -> String {
    format!(
        "{}, {:02} de {}",
        WEEKDAYS_SHORT[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS_SHORT[date.month0() as usize]
    )
}

fn clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn status_emoji(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Andamento => "🟢",
        EventStatus::Realizado => "✅",
        EventStatus::Cancelado => "❌",
    }
}

fn status_label(status: EventStatus) -> &'static str {
    match status {
        EventStatus::Andamento => "Confirmado",
        EventStatus::Realizado => "Realizado",
        EventStatus::Cancelado => "Cancelado",
    }
}

pub fn render(event: &Event, style: InviteStyle) -> Invite {
    let invite = match style {
        InviteStyle::Full => full(event),
        InviteStyle::Simple => simple(event),
        InviteStyle::Whatsapp => whatsapp(event),
    };
    Invite {
        invite,
        style: style.as_str(),
    }
}

fn full(event: &Event) -> String {
    let about = event.description.as_deref().unwrap_or(
        "Atividade especial do Grupo Escoteiro Pirabeiraba. Venha participar desta \
         experiência única de aprendizado, diversão e crescimento pessoal!",
    );

    format!(
        "⚜️ *{group}* ⚜️\n\n\
         {emoji} *{title}*\n\
         ℹ️ *Situação:* {label}\n\n\
         📅 *Data:* {date}\n\
         🕐 *Horário:* {time}\n\n\
         📝 *Sobre o evento:*\n{about}\n\n\
         📍 *Local:* {location}\n\n\
         📞 *Dúvidas?* Entre em contato com a chefia do grupo\n\n\
         ---\n\
         🏕️ *{group_name}*\n\
         📍 {town}",
        group = GROUP_NAME.to_uppercase(),
        emoji = status_emoji(event.status),
        title = event.title.to_uppercase(),
        label = status_label(event.status),
        date = long_date(event.event_date),
        time = clock(event.event_time),
        about = about,
        location = event.location,
        group_name = GROUP_NAME,
        town = GROUP_TOWN,
    )
}

fn simple(event: &Event) -> String {
    format!(
        "⚜️ *{group}* ⚜️\n\n\
         📅 *{title}*\n\
         🗓️ {date} às {time}\n\n\
         📝 {about}\n\n\
         🎯 Traga uniforme, água e lanche\n\
         📍 {location}\n\n\
         ⚜️ *{motto}*",
        group = GROUP_NAME,
        title = event.title,
        date = numeric_date(event.event_date),
        time = clock(event.event_time),
        about = event
            .description
            .as_deref()
            .unwrap_or("Atividade escoteira especial!"),
        location = event.location,
        motto = MOTTO,
    )
}

fn whatsapp(event: &Event) -> String {
    format!(
        "⚜️ *ESCOTEIROS PIRABEIRABA* ⚜️\n\n\
         🏕️ *{title}*\n\
         📅 {date} - {time}\n\n\
         {about}\n\n\
         🎒 Traga: uniforme, água e lanche\n\
         📍 {location}\n\n\
         ⚜️ *{motto}*",
        title = event.title,
        date = short_date(event.event_date),
        time = clock(event.event_time),
        about = event
            .description
            .as_deref()
            .unwrap_or("Atividade escoteira especial!"),
        location = event.location,
        motto = MOTTO,
    )
}
