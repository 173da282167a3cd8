use anyhow::{Result, bail};
use console::style;
use wonderland_core::{
    AREAS, LessonCriteria, MemoryStore, SessionContext, SessionCriteria, SortMode,
    aggregate::{progress_for_lesson, total_spent},
    area_counts,
    areas::distinct_categories,
    filter::parse_assignment,
    filter_lessons, filter_sessions, find_area, format_lesson_line, format_session_line,
    format_summary_readable, format_timestamp, lessons_for_area, partition_sessions,
    sessions::count_by_type,
    sort_lessons, summarize,
};

const RECENT_BOOKMARKS: usize = 3;

pub fn lessons(
    store: &MemoryStore,
    ctx: &SessionContext,
    query: &str,
    category: &str,
    level: &str,
    sort: &str,
    filters: &[String],
) -> Result<()> {
    let mut criteria = LessonCriteria::new();
    criteria.set("query", query)?;
    criteria.set("category", category)?;
    criteria.set("level", level)?;
    for raw in filters {
        let (key, value) = parse_assignment(raw)?;
        criteria.set(key, value)?;
    }
    let mode: SortMode = sort.parse()?;

    let all = &store.catalog().lessons;
    let mut view = filter_lessons(all, &criteria);
    sort_lessons(&mut view, mode);

    println!(
        "{} {}",
        style("Categories:").dim(),
        distinct_categories(all).join(", ")
    );
    println!(
        "{}\n",
        style(format!(
            "Showing {} of {} lessons, sorted by {}",
            view.len(),
            all.len(),
            mode
        ))
        .dim()
    );

    if view.is_empty() {
        println!("{}", style("No lessons match these filters.").yellow());
        return Ok(());
    }

    for lesson in view {
        let owned = if ctx.owns(lesson.id) {
            style(" owned").green().to_string()
        } else {
            String::new()
        };
        println!("{}{}", format_lesson_line(lesson), owned);
    }
    Ok(())
}

pub fn sessions(
    store: &MemoryStore,
    ctx: &SessionContext,
    session_type: &str,
    window: &str,
) -> Result<()> {
    let mut criteria = SessionCriteria::new();
    criteria.set("type", session_type)?;
    criteria.set("window", window)?;

    let all = &store.catalog().sessions;
    let counts = count_by_type(all);
    let summary: Vec<String> = counts
        .iter()
        .map(|(session_type, n)| format!("{} {}", n, session_type))
        .collect();
    println!("{} {}\n", style("Sessions:").dim(), summary.join(" · "));

    let selected: Vec<_> = filter_sessions(all, &criteria, ctx.now)
        .into_iter()
        .cloned()
        .collect();
    let partition = partition_sessions(&selected, ctx.now);

    if !partition.upcoming.is_empty() {
        println!("{}", style("## Upcoming").bold());
        for session in &partition.upcoming {
            println!("{}", format_session_line(session));
            println!("   {}", style(&session.join_link).cyan());
        }
        println!();
    }

    if !partition.past.is_empty() {
        println!("{}", style("## Past").bold());
        for session in &partition.past {
            println!("{}", style(format_session_line(session)).dim());
        }
        println!();
    }

    if selected.is_empty() {
        println!("{}", style("No coaching sessions scheduled.").yellow());
    }
    Ok(())
}

pub fn progress(store: &MemoryStore, ctx: &SessionContext) {
    let records = store.user_progress(ctx.user_id());
    let summary = summarize(&records, &ctx.user);

    println!("# {}\n", ctx.user.name);
    print!("{}", format_summary_readable(&summary));
    println!(
        "**Total spent:** ${:.2}\n",
        total_spent(&store.catalog().lessons, &ctx.user)
    );

    if summary.total_purchased == 0 {
        println!("{}", style("No lessons purchased yet.").yellow());
        return;
    }

    println!("## Lessons\n");
    for lesson_id in &ctx.user.purchased_lessons {
        let Ok(lesson) = store.lesson(*lesson_id) else {
            continue;
        };
        match progress_for_lesson(&records, lesson.id) {
            Some(record) => {
                let recent: Vec<String> = record
                    .bookmarks
                    .recent(RECENT_BOOKMARKS)
                    .into_iter()
                    .map(format_timestamp)
                    .collect();
                println!(
                    "{:>3}% {} {} {}",
                    record.completion_percentage.value(),
                    lesson.title,
                    style(format!("({})", record.status())).dim(),
                    if recent.is_empty() {
                        String::new()
                    } else {
                        format!("· bookmarks {}", recent.join(", "))
                    }
                );
            }
            None => println!("  0% {} {}", lesson.title, style("(Not Started)").dim()),
        }
    }
}

pub fn areas(store: &MemoryStore, area_id: Option<&str>) -> Result<()> {
    let lessons = &store.catalog().lessons;

    if let Some(id) = area_id {
        let area = find_area(id)?;
        println!("# {}\n\n{}\n", area.label, style(area.description).dim());
        let matched = lessons_for_area(area, lessons);
        if matched.is_empty() {
            println!(
                "{}",
                style(format!("No lessons found for {}. More content coming soon!", area.label))
                    .yellow()
            );
        }
        for lesson in matched {
            println!("{}", format_lesson_line(lesson));
        }
        return Ok(());
    }

    for (area, count) in area_counts(&AREAS, lessons) {
        println!(
            "{} {:<22} {} related lessons",
            style("●").color256(area_color(area.color)),
            area.label,
            count
        );
    }
    println!(
        "\n{}",
        style(format!(
            "{} areas · {} lessons · {} categories",
            AREAS.len(),
            lessons.len(),
            distinct_categories(lessons).len()
        ))
        .dim()
    );
    Ok(())
}

/// Nearest xterm-256 cube color for a "#RRGGBB" string.
fn area_color(hex: &str) -> u8 {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .map(|v| (u16::from(v) * 5 / 255) as u8)
            .unwrap_or(0)
    };
    16 + 36 * channel(1..3) + 6 * channel(3..5) + channel(5..7)
}

pub fn wisdom(store: &MemoryStore, ctx: &SessionContext, id: Option<u32>) {
    let quotes = &store.catalog().wisdom;
    let quote = match id {
        Some(id) => wonderland_core::wisdom::quote_by_id(quotes, id),
        None => store.daily_quote(ctx.now.date_naive()),
    };

    match quote {
        Some(quote) => println!(
            "“{}”\n   {}",
            quote.text,
            style(format!("~ {}", quote.author)).dim()
        ),
        None => println!("{}", style("No wisdom available today.").yellow()),
    }
}

/// Returns whether anything changed.
pub fn purchase(store: &mut MemoryStore, ctx: &mut SessionContext, lesson_id: u32) -> Result<bool> {
    let added = store.purchase_lesson(ctx, lesson_id)?;
    let title = &store.lesson(lesson_id)?.title;
    if added {
        println!("{} Successfully purchased \"{}\"!", style("✓").green().bold(), title);
    } else {
        println!("{} You already own \"{}\"", style("•").dim(), title);
    }
    Ok(added)
}

pub fn watch(store: &mut MemoryStore, ctx: &SessionContext, lesson_id: u32, percent: i64) -> Result<()> {
    let record = store.update_progress(ctx, lesson_id, percent)?;
    println!(
        "{} Progress saved: {}% ({})",
        style("✓").green().bold(),
        record.completion_percentage.value(),
        record.status()
    );
    Ok(())
}

/// Returns whether anything changed.
pub fn bookmark(store: &mut MemoryStore, ctx: &SessionContext, lesson_id: u32, seconds: u32) -> Result<bool> {
    let Some((record, added)) = store.add_bookmark(ctx, lesson_id, seconds) else {
        bail!("start lesson {lesson_id} before bookmarking it");
    };
    if added {
        println!(
            "{} Bookmarked {} ({} total)",
            style("✓").green().bold(),
            format_timestamp(seconds),
            record.bookmarks.len()
        );
    } else {
        println!("{} {} is already bookmarked", style("•").dim(), format_timestamp(seconds));
    }
    Ok(added)
}
