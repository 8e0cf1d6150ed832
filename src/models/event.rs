use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use crate::models::pagination::PageInfo;
use crate::models::validation::{
    fits_short_text, non_blank, parse_event_date, parse_event_time, MAX_DESCRIPTION_CHARS,
    MAX_IMAGE_URL_LEN,
};
use crate::utils::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Andamento,
    Realizado,
    Cancelado,
}

#[derive(Debug, Error)]
#[error("unknown event status '{0}'")]
pub struct InvalidStatus(pub String);

impl EventStatus {
    pub const ALL: [EventStatus; 3] = [
        EventStatus::Andamento,
        EventStatus::Realizado,
        EventStatus::Cancelado,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Andamento => "andamento",
            EventStatus::Realizado => "realizado",
            EventStatus::Cancelado => "cancelado",
        }
    }

    /// The only automatic move: scheduled events become done once their
    /// date has passed. The database sweep binds exactly this pair.
    pub const SETTLES: (EventStatus, EventStatus) =
        (EventStatus::Andamento, EventStatus::Realizado);

    /// The status an event carries once `today` is reached.
    pub fn settled(self, event_date: NaiveDate, today: NaiveDate) -> Self {
        let (from, to) = Self::SETTLES;
        if self == from && event_date < today {
            to
        } else {
            self
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| InvalidStatus(s.to_string()))
    }
}

impl TryFrom<String> for EventStatus {
    type Error = InvalidStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    #[sqlx(try_from = "String")]
    pub status: EventStatus,
    pub image_url: Option<String>,
    pub location: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub pagination: PageInfo,
}

/// Body of create and update requests, as sent by the dashboard form.
#[derive(Debug, Default, Deserialize)]
pub struct EventPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<String>,
    pub event_time: Option<String>,
    pub image_url: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

/// A validated event ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub image_url: Option<String>,
    pub location: String,
    pub status: EventStatus,
}

fn invalid(message: &str) -> AppError {
    AppError::ValidationError(message.to_string())
}

impl EventPayload {
    pub fn validate(&self) -> Result<EventDraft, AppError> {
        let title = non_blank(self.title.as_deref()).ok_or_else(|| invalid("Título é obrigatório"))?;
        if !fits_short_text(title) {
            return Err(invalid("Título muito longo. Máximo 255 caracteres."));
        }

        let raw_date = self
            .event_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .ok_or_else(|| invalid("Data é obrigatória"))?;

        let raw_time = self
            .event_time
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| invalid("Horário é obrigatório"))?;

        let location = non_blank(self.location.as_deref())
            .ok_or_else(|| invalid("Localização é obrigatória"))?;

        let event_date = parse_event_date(raw_date)
            .ok_or_else(|| invalid("Data inválida. Use o formato AAAA-MM-DD"))?;

        let event_time = parse_event_time(raw_time)
            .ok_or_else(|| invalid("Horário inválido. Use o formato HH:MM"))?;

        let image_url = self.image_url.as_deref().filter(|i| !i.is_empty());
        if image_url.is_some_and(|i| i.len() > MAX_IMAGE_URL_LEN) {
            return Err(invalid("Imagem muito grande. Tente uma imagem menor."));
        }

        let description = non_blank(self.description.as_deref());
        if description.is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_CHARS) {
            return Err(invalid("Descrição muito longa. Máximo 1000 caracteres."));
        }

        let status = match non_blank(self.status.as_deref()) {
            Some(raw) => raw.parse().map_err(|_| invalid("Status inválido"))?,
            None => EventStatus::Andamento,
        };

        Ok(EventDraft {
            title: title.to_string(),
            description: description.map(str::to_string),
            event_date,
            event_time,
            image_url: image_url.map(str::to_string),
            location: location.to_string(),
            status,
        })
    }
}
