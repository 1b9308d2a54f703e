use crate::bot::session::SessionUser;
use crate::bot::{Data, Error};
use crate::schedule::edit::{HoursChange, MAX_NOTE_CHARS};
use crate::schedule::models::DayRecord;
use crate::utils::format::{create_day_embed, format_error_message};
use poise::serenity_prelude as serenity;

const NOTE_INPUT_ID: &str = "note";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayAction {
    Hours(HoursChange),
    EditNote,
    SubmitNote,
}

/// Button or modal bound to one day of one user's schedule.
///
/// Encoded as `{kind}:{owner discord id}:{day}` in the component custom id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayComponent {
    pub action: DayAction,
    pub owner_id: String,
    pub day: u32,
}

impl DayComponent {
    pub fn new(action: DayAction, owner_id: &str, day: u32) -> Self {
        Self {
            action,
            owner_id: owner_id.to_string(),
            day,
        }
    }

    pub fn custom_id(&self) -> String {
        let kind = match self.action {
            DayAction::Hours(change) => format!("hours_{}", change.as_str()),
            DayAction::EditNote => "note_edit".to_string(),
            DayAction::SubmitNote => "note_modal".to_string(),
        };
        format!("{}:{}:{}", kind, self.owner_id, self.day)
    }

    pub fn parse(custom_id: &str) -> Option<Self> {
        let mut parts = custom_id.split(':');
        let kind = parts.next()?;
        let owner_id = parts.next()?;
        let day: u32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() || owner_id.is_empty() {
            return None;
        }

        let action = match kind {
            "note_edit" => DayAction::EditNote,
            "note_modal" => DayAction::SubmitNote,
            _ => DayAction::Hours(HoursChange::parse(kind.strip_prefix("hours_")?)?),
        };

        Some(Self::new(action, owner_id, day))
    }
}

pub fn day_buttons(owner_id: &str, day: u32) -> serenity::CreateActionRow {
    let id = |action| DayComponent::new(action, owner_id, day).custom_id();

    serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new(id(DayAction::Hours(HoursChange::Decrement)))
            .label("➖ 0.5 h")
            .style(serenity::ButtonStyle::Secondary),
        serenity::CreateButton::new(id(DayAction::Hours(HoursChange::Increment)))
            .label("➕ 0.5 h")
            .style(serenity::ButtonStyle::Success),
        serenity::CreateButton::new(id(DayAction::EditNote))
            .label("📝 Notatka")
            .style(serenity::ButtonStyle::Primary),
    ])
}

async fn respond_ephemeral(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    message: &str,
) -> Result<(), Error> {
    interaction
        .create_response(
            &ctx.http,
            serenity::CreateInteractionResponse::Message(
                serenity::CreateInteractionResponseMessage::new()
                    .content(message)
                    .ephemeral(true),
            ),
        )
        .await?;
    Ok(())
}

fn updated_card(component: &DayComponent, records: &[DayRecord]) -> serenity::CreateInteractionResponseMessage {
    let message = serenity::CreateInteractionResponseMessage::new()
        .components(vec![day_buttons(&component.owner_id, component.day)]);

    match records.iter().find(|r| r.day_number == component.day) {
        Some(record) => message.embed(create_day_embed(record)),
        None => message,
    }
}

pub async fn handle_day_interaction(
    ctx: &serenity::Context,
    interaction: &serenity::ComponentInteraction,
    data: &Data,
) -> Result<(), Error> {
    let Some(component) = DayComponent::parse(&interaction.data.custom_id) else {
        return respond_ephemeral(ctx, interaction, "Nieznana akcja").await;
    };

    // Only the owner of the schedule may press its buttons
    if interaction.user.id.to_string() != component.owner_id {
        return respond_ephemeral(ctx, interaction, "To nie jest Twój grafik").await;
    }

    let session = SessionUser::from_discord(&interaction.user);
    let user = match session.ensure_registered(data).await {
        Ok(user) => user,
        Err(e) => {
            let msg = format_error_message(&format!("Nie udało się pobrać danych użytkownika: {}", e));
            return respond_ephemeral(ctx, interaction, &msg).await;
        }
    };

    match component.action {
        DayAction::Hours(change) => {
            match data.schedules.adjust_hours(user.id, data.today(), component.day, change).await {
                Ok(records) => {
                    interaction
                        .create_response(
                            &ctx.http,
                            serenity::CreateInteractionResponse::UpdateMessage(updated_card(&component, &records)),
                        )
                        .await?;
                }
                Err(e) => {
                    respond_ephemeral(ctx, interaction, &format_error_message(&e.to_string())).await?;
                }
            }
        }
        DayAction::EditNote => {
            let records = match data.schedules.load_or_generate(user.id, data.today()).await {
                Ok(records) => records,
                Err(e) => {
                    let msg = format_error_message(&format!("Nie udało się wczytać grafiku: {}", e));
                    return respond_ephemeral(ctx, interaction, &msg).await;
                }
            };
            let current = records
                .iter()
                .find(|r| r.day_number == component.day)
                .map(|r| r.note.clone())
                .unwrap_or_default();

            let modal_id = DayComponent::new(DayAction::SubmitNote, &component.owner_id, component.day).custom_id();
            let modal = serenity::CreateModal::new(modal_id, format!("Notatka: dzień {}", component.day))
                .components(vec![serenity::CreateActionRow::InputText(
                    serenity::CreateInputText::new(serenity::InputTextStyle::Paragraph, "Notatka", NOTE_INPUT_ID)
                        .placeholder("np. 12h 46min")
                        .value(current)
                        .required(false)
                        .max_length(MAX_NOTE_CHARS as u16),
                )]);

            interaction
                .create_response(&ctx.http, serenity::CreateInteractionResponse::Modal(modal))
                .await?;
        }
        DayAction::SubmitNote => {
            respond_ephemeral(ctx, interaction, "Nieznana akcja").await?;
        }
    }

    Ok(())
}

pub async fn handle_note_modal(
    ctx: &serenity::Context,
    interaction: &serenity::ModalInteraction,
    data: &Data,
) -> Result<(), Error> {
    let component = DayComponent::parse(&interaction.data.custom_id)
        .filter(|c| c.action == DayAction::SubmitNote && interaction.user.id.to_string() == c.owner_id);

    let reply = |content: String| {
        serenity::CreateInteractionResponse::Message(
            serenity::CreateInteractionResponseMessage::new()
                .content(content)
                .ephemeral(true),
        )
    };

    let Some(component) = component else {
        interaction
            .create_response(&ctx.http, reply("Nieznana akcja".to_string()))
            .await?;
        return Ok(());
    };

    let note = interaction
        .data
        .components
        .first()
        .and_then(|row| row.components.first())
        .and_then(|input| {
            if let serenity::ActionRowComponent::InputText(input) = input {
                input.value.as_deref()
            } else {
                None
            }
        })
        .unwrap_or("");

    let session = SessionUser::from_discord(&interaction.user);
    let result = match session.ensure_registered(data).await {
        Ok(user) => data.schedules.set_note(user.id, data.today(), component.day, note).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(records) => {
            interaction
                .create_response(
                    &ctx.http,
                    serenity::CreateInteractionResponse::UpdateMessage(updated_card(&component, &records)),
                )
                .await?;
        }
        Err(e) => {
            interaction
                .create_response(&ctx.http, reply(format_error_message(&e.to_string())))
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_id_format() {
        let inc = DayComponent::new(DayAction::Hours(HoursChange::Increment), "123", 4);
        assert_eq!(inc.custom_id(), "hours_inc:123:4");
        let dec = DayComponent::new(DayAction::Hours(HoursChange::Decrement), "123", 4);
        assert_eq!(dec.custom_id(), "hours_dec:123:4");
        assert_eq!(DayComponent::new(DayAction::EditNote, "9", 30).custom_id(), "note_edit:9:30");
        assert_eq!(DayComponent::new(DayAction::SubmitNote, "9", 30).custom_id(), "note_modal:9:30");
    }

    #[test]
    fn test_parse_round_trip() {
        for action in [
            DayAction::Hours(HoursChange::Increment),
            DayAction::Hours(HoursChange::Decrement),
            DayAction::EditNote,
            DayAction::SubmitNote,
        ] {
            let component = DayComponent::new(action, "555", 17);
            assert_eq!(DayComponent::parse(&component.custom_id()), Some(component));
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(DayComponent::parse("time_edit"), None);
        assert_eq!(DayComponent::parse("hours_up:1:2"), None);
        assert_eq!(DayComponent::parse("hours_inc:1:x"), None);
        assert_eq!(DayComponent::parse("hours_inc::2"), None);
        assert_eq!(DayComponent::parse("hours_inc:1:2:3"), None);
    }
}
