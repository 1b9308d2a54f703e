use crate::schedule::admin::AdminSummary;
use crate::schedule::aggregator::{ScheduleStats, WEEKLY_OVERTIME_THRESHOLD, max_hours};
use crate::schedule::calendar::WEEKDAY_HEADERS;
use crate::schedule::models::DayRecord;
use crate::utils::time::{format_day_title, format_hours};
use chrono::Datelike;
use poise::serenity_prelude as serenity;

const CHART_WIDTH: f64 = 10.0;

/// Discord rejects embed descriptions longer than this.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;
/// Notes are cut to this many characters in list views; the day card shows them in full.
pub const NOTE_PREVIEW_CHARS: usize = 40;

/// Collapses line breaks and cuts the note to `max_chars`, adding "…" when cut.
pub fn note_preview(note: &str, max_chars: usize) -> String {
    let flat = note.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.push('…');
    cut
}

/// Joins `lines` with newlines, stopping before the text would exceed `limit`
/// characters and ending with a "+N" marker for what was left out.
pub fn join_within_limit(lines: &[String], limit: usize) -> String {
    let mut text = String::new();
    let mut used = 0;

    for (index, line) in lines.iter().enumerate() {
        let separator = if index == 0 { 0 } else { 1 };
        let len = line.chars().count();
        let remaining = lines.len() - index;
        let marker = format!("\n… (+{})", remaining);
        // Keep room for the marker while more lines follow
        let reserve = if remaining > 1 { marker.chars().count() } else { 0 };

        if used + separator + len + reserve > limit {
            text.push_str(&marker);
            return text;
        }
        if index > 0 {
            text.push('\n');
        }
        text.push_str(line);
        used += separator + len;
    }
    text
}

pub fn format_day_line(record: &DayRecord) -> String {
    let weekday = WEEKDAY_HEADERS[record.iso_date.weekday().num_days_from_monday() as usize];
    let shift = if record.is_work_day() { "🟢" } else { "🔴" };
    let today = if record.is_today { " 👉 **dziś**" } else { "" };

    let mut line = format!(
        "`{:>2}` {} {} {}",
        record.day_number,
        weekday,
        shift,
        record.shift_code.description()
    );

    if record.hours_worked > 0.0 {
        line.push_str(&format!(" · **{}**", format_hours(record.hours_worked)));
    }
    if record.has_note() {
        line.push_str(&format!(" · 📝 {}", note_preview(&record.note, NOTE_PREVIEW_CHARS)));
    }
    line.push_str(today);
    line
}

pub fn format_schedule_list(records: &[DayRecord]) -> String {
    if records.is_empty() {
        return "Brak danych w grafiku".to_string();
    }

    let lines: Vec<String> = records.iter().map(format_day_line).collect();
    join_within_limit(&lines, EMBED_DESCRIPTION_LIMIT)
}

pub fn format_stats_summary(stats: &ScheduleStats) -> String {
    let mut summary = String::new();

    summary.push_str(&format!("⏱️ **Suma godzin**: {}\n", format_hours(stats.total_hours)));
    summary.push_str(&format!("📅 **Ten tydzień**: {}\n", format_hours(stats.current_week_hours)));
    summary.push_str(&format!(
        "🔥 **Nadgodziny** (> {} h/tydz.): {}\n",
        WEEKLY_OVERTIME_THRESHOLD,
        format_hours(stats.overtime_hours)
    ));
    summary.push_str(&format!(
        "💼 **Dni pracy**: {} · 🌴 **Dni wolne**: {}",
        stats.work_day_count, stats.off_day_count
    ));

    summary
}

pub fn format_weekly_breakdown(stats: &ScheduleStats) -> String {
    if stats.weekly_hours.is_empty() {
        return "Brak zapisanych godzin".to_string();
    }

    stats
        .weekly_hours
        .iter()
        .map(|(week, hours)| {
            let marker = if *hours > WEEKLY_OVERTIME_THRESHOLD { " 🔥" } else { "" };
            format!("Tydzień {}: {}{}", week, format_hours(*hours), marker)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Horizontal bar per logged day, scaled to the busiest day (at least 12 h).
pub fn format_hours_chart(records: &[DayRecord]) -> String {
    let max = max_hours(records);
    let lines: Vec<String> = records
        .iter()
        .filter(|r| r.hours_worked > 0.0)
        .map(|r| {
            let width = ((r.hours_worked / max) * CHART_WIDTH).round() as usize;
            format!("{:>2} {:<10} {}", r.day_number, "█".repeat(width), format_hours(r.hours_worked))
        })
        .collect();

    if lines.is_empty() {
        return String::new();
    }
    format!("```\n{}\n```", lines.join("\n"))
}

pub fn format_admin_summary(summary: &AdminSummary) -> String {
    if summary.users.is_empty() {
        return "Brak użytkowników".to_string();
    }

    let lines: Vec<String> = summary
        .users
        .iter()
        .map(|user| {
            let contact = match &user.email {
                Some(email) => format!("<@{}>, {}", user.discord_id, email),
                None => format!("<@{}>", user.discord_id),
            };
            match &user.stats {
                Ok(stats) => format!(
                    "👤 **{}** ({}): {} · nadgodziny {} · dni pracy {}",
                    user.display_name,
                    contact,
                    format_hours(stats.total_hours),
                    format_hours(stats.overtime_hours),
                    stats.work_day_count
                ),
                Err(error) => format!(
                    "⚠️ **{}** ({}): nie udało się wczytać grafiku ({})",
                    user.display_name,
                    contact,
                    note_preview(error, 80)
                ),
            }
        })
        .collect();

    let mut totals = format!(
        "👥 **Użytkownicy**: {}\n⏱️ **Suma godzin**: {}\n📊 **Średnio na osobę**: {}\n🔥 **Nadgodziny łącznie**: {}",
        summary.user_count,
        format_hours(summary.total_hours),
        format_hours(summary.average_hours),
        format_hours(summary.total_overtime)
    );
    if summary.unreadable_count > 0 {
        totals.push_str(&format!(
            "\n⚠️ **Nieczytelne grafiki**: {} (użyj /admin_reset)",
            summary.unreadable_count
        ));
    }

    // Totals always fit; the per-user list gets what is left
    let budget = EMBED_DESCRIPTION_LIMIT - totals.chars().count() - 2;
    format!("{}\n\n{}", join_within_limit(&lines, budget), totals)
}

pub fn format_error_message(error: &str) -> String {
    format!("❌ **Błąd**: {}", error)
}

pub fn format_success_message(message: &str) -> String {
    format!("✅ {}", message)
}

// Embed utility functions
pub fn create_success_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .color(0x10b981) // Green
        .timestamp(serenity::Timestamp::now())
}

pub fn create_error_embed(title: &str, description: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(description)
        .color(0xf43f5e) // Red
        .timestamp(serenity::Timestamp::now())
}

pub fn create_schedule_embed(display_name: &str, title: &str, records: &[DayRecord]) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(format!("📋 {}", title))
        .description(format_schedule_list(records))
        .color(0x3b82f6) // Blue
        .author(serenity::CreateEmbedAuthor::new(format!("Grafik: {}", display_name)))
        .timestamp(serenity::Timestamp::now())
}

pub fn create_day_embed(record: &DayRecord) -> serenity::CreateEmbed {
    let color = if record.is_work_day() { 0x10b981 } else { 0xf43f5e };
    let note = if record.has_note() { record.note.as_str() } else { "—" };

    let mut embed = serenity::CreateEmbed::new()
        .title(format_day_title(
            record.day_number,
            &record.month_label,
            record.iso_date.year(),
            &record.weekday_label,
        ))
        .field("Zmiana", record.shift_code.description(), true)
        .field("Przepracowane", format_hours(record.hours_worked), true)
        .field("Notatka", note, false)
        .color(color);

    if record.is_today {
        embed = embed.footer(serenity::CreateEmbedFooter::new("Dzisiaj"));
    }
    embed
}

pub fn create_stats_embed(
    display_name: &str,
    month_locative: &str,
    stats: &ScheduleStats,
    records: &[DayRecord],
) -> serenity::CreateEmbed {
    let mut description = format_stats_summary(stats);
    let chart = format_hours_chart(records);
    if !chart.is_empty() {
        description.push_str("\n\n");
        description.push_str(&chart);
    }

    serenity::CreateEmbed::new()
        .title(format!("📊 Statystyki w {}", month_locative))
        .description(description)
        .field("Godziny tygodniowo", format_weekly_breakdown(stats), false)
        .color(0x8b5cf6) // Purple
        .author(serenity::CreateEmbedAuthor::new(display_name))
        .timestamp(serenity::Timestamp::now())
}

pub fn create_calendar_embed(title: &str, grid: &str, stats: &ScheduleStats) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(format!("🗓️ {}", title))
        .description(format!("```\n{}```\n`-` dzień wolny · `*` dziś", grid))
        .field("Dni pracy", stats.work_day_count.to_string(), true)
        .field("Dni wolne", stats.off_day_count.to_string(), true)
        .color(0x3b82f6) // Blue
}

pub fn create_admin_embed(summary: &AdminSummary) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("🛡️ Panel administratora")
        .description(format_admin_summary(summary))
        .color(0xf59e0b) // Amber
        .timestamp(serenity::Timestamp::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::admin::{UserSchedule, summarize};
    use crate::schedule::aggregator::aggregate;
    use crate::schedule::generator::{GeneratorConfig, generate};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 3).unwrap()
    }

    fn seeded() -> Vec<DayRecord> {
        generate(2026, 10, today(), &GeneratorConfig::default().with_demo_seed())
    }

    #[test]
    fn test_format_day_line() {
        let records = seeded();
        assert_eq!(format_day_line(&records[0]), "` 1` Cz 🔴 Dzień wolny");
        assert_eq!(
            format_day_line(&records[2]),
            "` 3` Sb 🟢 Praca · **13 h** · 📝 12h 46min 👉 **dziś**"
        );
        assert_eq!(format_day_line(&records[5]), "` 6` Wt 🟢 Praca");
    }

    #[test]
    fn test_format_schedule_list() {
        assert_eq!(format_schedule_list(&[]), "Brak danych w grafiku");
        assert_eq!(format_schedule_list(&seeded()).lines().count(), 31);
    }

    #[test]
    fn test_format_weekly_breakdown() {
        let mut records = seeded();
        for day in 5..=9 {
            records[day - 1].hours_worked = 10.0;
        }
        let stats = aggregate(&records, today());
        assert_eq!(
            format_weekly_breakdown(&stats),
            "Tydzień 40: 38 h\nTydzień 41: 50 h 🔥"
        );
        assert_eq!(format_weekly_breakdown(&ScheduleStats::default()), "Brak zapisanych godzin");
    }

    #[test]
    fn test_format_stats_summary() {
        let stats = aggregate(&seeded(), today());
        let text = format_stats_summary(&stats);
        assert!(text.contains("**Suma godzin**: 48.5 h"));
        assert!(text.contains("**Ten tydzień**: 38 h"));
        assert!(text.contains("**Dni pracy**: 27"));
    }

    #[test]
    fn test_format_hours_chart() {
        assert_eq!(format_hours_chart(&generate(2026, 10, today(), &GeneratorConfig::default())), "");

        let chart = format_hours_chart(&seeded());
        assert!(chart.starts_with("```\n"));
        // 13 h is the busiest day and gets the full bar
        assert!(chart.contains(&format!(" 3 {} 13 h", "█".repeat(10))));
        assert_eq!(chart.lines().count(), 6);
    }

    #[test]
    fn test_format_admin_summary() {
        let summary = summarize(
            &[UserSchedule {
                user_id: 1,
                discord_id: "77".to_string(),
                display_name: "Ania".to_string(),
                email: None,
                schedule: Ok(seeded()),
            }],
            today(),
        );
        let text = format_admin_summary(&summary);
        assert!(text.starts_with("👤 **Ania** (<@77>): 48.5 h"));
        assert!(text.contains("**Średnio na osobę**: 48.5 h"));
        assert_eq!(format_admin_summary(&AdminSummary::default()), "Brak użytkowników");
    }

    #[test]
    fn test_note_preview() {
        assert_eq!(note_preview("12h 46min", 40), "12h 46min");
        assert_eq!(note_preview("pierwsza\ndruga\r\n trzecia", 40), "pierwsza druga trzecia");
        assert_eq!(note_preview("abcdefgh", 5), "abcde…");
        assert_eq!(note_preview("żółćżółć", 4), "żółć…");
    }

    #[test]
    fn test_note_with_newlines_stays_on_one_line() {
        let mut records = seeded();
        records[5].note = "zmiana\nna nocną".to_string();
        assert_eq!(format_day_line(&records[5]), "` 6` Wt 🟢 Praca · 📝 zmiana na nocną");
        assert_eq!(format_schedule_list(&records).lines().count(), 31);
    }

    #[test]
    fn test_join_within_limit() {
        let lines: Vec<String> = (1..=5).map(|i| format!("line{}", i)).collect();
        assert_eq!(join_within_limit(&lines, 1000), "line1\nline2\nline3\nline4\nline5");
        assert_eq!(join_within_limit(&lines, 20), "line1\nline2\n… (+3)");
        assert_eq!(join_within_limit(&[], 10), "");
    }

    #[test]
    fn test_schedule_list_with_longest_notes_fits_embed() {
        let mut records = seeded();
        for record in records.iter_mut() {
            record.note = "x".repeat(crate::schedule::edit::MAX_NOTE_CHARS);
        }
        let text = format_schedule_list(&records);
        assert!(text.chars().count() <= EMBED_DESCRIPTION_LIMIT);
        assert_eq!(text.lines().count(), 31);
        assert!(text.contains(&format!("📝 {}…", "x".repeat(NOTE_PREVIEW_CHARS))));
    }

    #[test]
    fn test_admin_summary_fits_embed() {
        let schedules: Vec<UserSchedule> = (0..200)
            .map(|i| UserSchedule {
                user_id: i,
                discord_id: format!("{}", 100_000_000_000_000_000i64 + i),
                display_name: format!("użytkownik z bardzo długą nazwą {}", i),
                email: Some(format!("user{}@example.com", i)),
                schedule: Ok(seeded()),
            })
            .collect();
        let text = format_admin_summary(&summarize(&schedules, today()));
        assert!(text.chars().count() <= EMBED_DESCRIPTION_LIMIT);
        assert!(text.contains("… (+"));
        assert!(text.contains("**Użytkownicy**: 200"));
    }

    #[test]
    fn test_admin_summary_lists_unreadable_user() {
        let schedules = vec![
            UserSchedule {
                user_id: 1,
                discord_id: "77".to_string(),
                display_name: "Ania".to_string(),
                email: None,
                schedule: Ok(seeded()),
            },
            UserSchedule {
                user_id: 2,
                discord_id: "78".to_string(),
                display_name: "Piotr".to_string(),
                email: None,
                schedule: Err("expected value at line 1 column 1".to_string()),
            },
        ];
        let text = format_admin_summary(&summarize(&schedules, today()));
        assert!(text.starts_with("👤 **Ania** (<@77>): 48.5 h"));
        assert!(text.contains("⚠️ **Piotr** (<@78>): nie udało się wczytać grafiku"));
        assert!(text.contains("**Nieczytelne grafiki**: 1"));
        assert!(text.contains("**Średnio na osobę**: 48.5 h"));
    }
}
