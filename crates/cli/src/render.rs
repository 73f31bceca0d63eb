//! Plain-text rendering of derived views.

use review_core::dashboard::{Dashboard, InsightKind};
use review_core::pipeline::BrowserPage;
use review_core::selection::FileSelection;
use review_core::view::ViewState;
use std::fmt::Write;
use storage::models::{Keyword, Project, UNKNOWN_FILE_LABEL};

const TEXT_WIDTH: usize = 56;

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

pub fn projects(projects: &[Project], current: &str) -> String {
    let mut out = String::new();
    for p in projects {
        let marker = if p.id == current { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<14} {} ({} файл(а), {} записей)",
            p.id,
            p.title,
            p.files.len(),
            p.records.len()
        );
    }
    out
}

pub fn files(project: &Project, selection: &FileSelection) -> String {
    let mut out = format!("Источники данных: {}\n", selection.label(&project.files));
    for f in &project.files {
        let mark = if selection.contains(&f.id) { "[x]" } else { "[ ]" };
        let _ = writeln!(
            out,
            "{mark} {:<10} {} ({}, {} строк)",
            f.id, f.name, f.upload_date, f.row_count
        );
    }
    for id in selection.iter().filter(|id| project.file(id).is_none()) {
        let _ = writeln!(out, "[x] {id:<10} {UNKNOWN_FILE_LABEL}");
    }
    out
}

pub fn browser(project: &Project, view: &ViewState, page: &BrowserPage<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} | {}", project.title, page.selection_label);

    let pills: Vec<String> = page
        .pills
        .iter()
        .map(|p| {
            if p.active {
                format!("[*{} {}]", p.label, p.count)
            } else {
                format!("[{} {}]", p.label, p.count)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", pills.join(" "));

    let search = view.search();
    let _ = writeln!(
        out,
        "Поиск: \"{}\" (ввод: \"{}\")  Сортировка: {}",
        search.applied(),
        search.pending(),
        view.sort()
    );
    let _ = writeln!(
        out,
        "{:<10} {:<28} {:<11} {:>5} {}",
        "ID",
        "Файл",
        "Тональность",
        format!("Увер.{}", view.sort().arrow()),
        "Текст"
    );

    if let Some(message) = page.empty_message() {
        let _ = writeln!(out, "  {message}");
    }
    for row in &page.rows {
        let _ = writeln!(
            out,
            "{:<10} {:<28} {:<11} {:>4}% {}",
            row.record.id,
            clip(row.file_name, 28),
            row.record.sentiment.label(),
            row.bar_percent,
            clip(&row.record.text, TEXT_WIDTH)
        );
    }

    let _ = write!(out, "{}", page.page.summary());
    if page.page.has_controls() {
        let _ = write!(out, "  {}", page.page.label());
    }
    out.push('\n');
    out
}

pub fn dashboard(project: &Project, dash: &Dashboard<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} | {}", project.title, dash.selection_label);
    if !project.description.is_empty() {
        let _ = writeln!(out, "{}", project.description);
    }

    let kpi = &dash.kpi;
    let _ = writeln!(
        out,
        "Всего отзывов: {}  NPS (Лояльность): {} ({})  Качество модели: {}",
        kpi.total_reviews, kpi.nps, kpi.nps_delta, kpi.model_quality
    );

    let total = dash.distribution.total.max(1);
    let _ = writeln!(out, "Тональность ({} записей):", dash.distribution.total);
    for slice in &dash.slices {
        let share = slice.value * 100 / total;
        let _ = writeln!(
            out,
            "  {:<11} {:>4} {:>3}% {}",
            slice.label,
            slice.value,
            share,
            "#".repeat(share / 5)
        );
    }

    if !dash.insights.is_empty() {
        let _ = writeln!(out, "AI инсайты:");
        for insight in &dash.insights {
            let icon = match insight.kind {
                InsightKind::Alert => '!',
                InsightKind::Note => '-',
            };
            match insight.headline {
                Some(headline) => {
                    let _ = writeln!(out, "  {icon} {} {}", headline.to_uppercase(), insight.body);
                }
                None => {
                    let _ = writeln!(out, "  {icon} {}", insight.body);
                }
            }
        }
    }

    if !dash.keyword_rows.is_empty() {
        let _ = writeln!(out, "Топ тем обсуждения:");
        let _ = writeln!(out, "  {:>20} | {}", "Жалобы", "Похвалы");
        for row in &dash.keyword_rows {
            let neg = row
                .negative
                .map(|k| format!("{} {}", k.name, k.count))
                .unwrap_or_default();
            let pos = row
                .positive
                .map(|k| format!("{} {}", k.count, k.name))
                .unwrap_or_default();
            let _ = writeln!(out, "  {neg:>20} | {pos}");
        }
    }
    out
}

pub fn keyword(keyword: Option<&Keyword>) -> String {
    match keyword {
        Some(k) => format!(
            "\"{}\"\nСвязанное понятие: {}\nAI Анализ: {}\n",
            k.name, k.related_word, k.ai_context
        ),
        None => "Выберите тему: keyword <название>\n".to_string(),
    }
}
