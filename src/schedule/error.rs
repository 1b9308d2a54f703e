use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised when day records are built, loaded or edited.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Nieprawidłowa data '{0}'. Oczekiwany format RRRR-MM-DD")]
    InvalidDate(String),

    #[error("Liczba godzin musi być nieujemną liczbą skończoną (otrzymano {0})")]
    InvalidHours(f64),

    #[error("Liczba godzin musi być wielokrotnością 0.5 (otrzymano {0})")]
    HoursNotInStep(f64),

    #[error("Liczba godzin nie może przekraczać 24 (otrzymano {0})")]
    HoursTooLarge(f64),

    #[error("Dzień {day}: flaga isWorking nie zgadza się z kodem zmiany '{code}'")]
    ShiftMismatch { day: u32, code: &'static str },

    #[error("Dzień {day} nie odpowiada dacie {date}")]
    DayMismatch { day: u32, date: NaiveDate },

    #[error("Dzień {0} występuje w grafiku więcej niż raz")]
    DuplicateDay(u32),

    #[error("Identyfikator '{0}' występuje w grafiku więcej niż raz")]
    DuplicateId(String),

    #[error("Brak dnia {0}: dni grafiku muszą iść kolejno od 1")]
    MissingDay(u32),

    #[error("Dzień {day} ({date}) należy do innego miesiąca niż reszta grafiku")]
    MixedMonth { day: u32, date: NaiveDate },

    #[error("Brak dnia {0} w grafiku")]
    DayNotFound(u32),

    #[error("Notatka jest za długa ({0} znaków, maksymalnie 200)")]
    NoteTooLong(usize),
}
