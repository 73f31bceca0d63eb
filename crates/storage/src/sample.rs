//! Built-in demo data: two projects with pre-labelled records and keyword insights.

use crate::models::{Channel, DataFile, Keyword, Kpi, Project, Record, Sentiment, Tone};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TEXTS: [&str; 15] = [
    "Автобус 404 опять не пришел по расписанию! Ждал 20 минут.",
    "Очень удобный новый маршрут, спасибо.",
    "Водитель курил в окно, запах шел в салон.",
    "Обычная поездка, ничего особенного.",
    "В салоне очень холодно, печка не работает.",
    "Чистый автобус, приехал вовремя.",
    "Почему отменили остановку у метро?",
    "Грязно в салоне, пыльно.",
    "Кондиционер работает слишком сильно.",
    "Вежливый водитель, подождал пассажиров.",
    "Не работает валидатор на входе.",
    "Контролеры были очень грубы.",
    "Прекрасный вид из окна парка.",
    "Сломана скамейка на остановке.",
    "Слишком долго ждать пересадки.",
];

const CHANNELS: [Channel; 4] = [Channel::Vk, Channel::MosRu, Channel::Portal, Channel::Telegram];

const SENTIMENT_CYCLE: [Sentiment; 10] = [
    Sentiment::Negative,
    Sentiment::Positive,
    Sentiment::Negative,
    Sentiment::Neutral,
    Sentiment::Negative,
    Sentiment::Positive,
    Sentiment::Negative,
    Sentiment::Negative,
    Sentiment::Negative,
    Sentiment::Positive,
];

/// Generates `count` records with ids `{prefix}-1..={prefix}-count`.
///
/// Texts, channels and labels cycle through fixed tables; confidence is drawn
/// from `[0.6, 0.99)`.
pub fn generate_records<R: Rng>(prefix: &str, count: usize, file_id: &str, rng: &mut R) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let mut text = TEXTS[i % TEXTS.len()].to_string();
            if i > TEXTS.len() {
                text.push_str(&format!(" (дубль {})", i / TEXTS.len()));
            }
            Record {
                id: format!("{}-{}", prefix, i + 1),
                text,
                source: CHANNELS[i % CHANNELS.len()],
                file_id: file_id.to_string(),
                sentiment: SENTIMENT_CYCLE[i % SENTIMENT_CYCLE.len()],
                confidence: 0.6 + rng.gen::<f64>() * 0.39,
                date: "2023-11-20".to_string(),
            }
        })
        .collect()
}

/// Sample projects with a fixed seed so repeated runs show the same numbers.
pub fn sample_projects() -> Vec<Project> {
    sample_projects_seeded(0x5e17)
}

pub fn sample_projects_seeded(seed: u64) -> Vec<Project> {
    let mut rng = StdRng::seed_from_u64(seed);
    vec![transport_project(&mut rng), parks_project(&mut rng)]
}

fn file(id: &str, name: &str, upload_date: &str, row_count: u32) -> DataFile {
    DataFile {
        id: id.to_string(),
        name: name.to_string(),
        upload_date: upload_date.to_string(),
        row_count,
    }
}

fn keyword(name: &str, count: u32, tone: Tone, related_word: &str, ai_context: &str) -> Keyword {
    Keyword {
        name: name.to_string(),
        count,
        tone,
        related_word: related_word.to_string(),
        ai_context: ai_context.to_string(),
    }
}

fn transport_project(rng: &mut StdRng) -> Project {
    let mut records = generate_records("100", 30, "f1", rng);
    records.extend(generate_records("101", 20, "f2", rng));
    Project {
        id: "1".to_string(),
        title: "Жалобы: Транспорт (Ноябрь)".to_string(),
        description: "Анализ обращений по автобусным маршрутам ЦАО".to_string(),
        kpi: Kpi {
            total_reviews: 1240,
            nps: -15,
            nps_delta: -2,
            avg_confidence: 89,
        },
        files: vec![
            file("f1", "export_vk_comments_nov.csv", "20.11.2023", 600),
            file("f2", "mos_ru_feedbacks.csv", "21.11.2023", 640),
        ],
        ai_insights: vec![
            "Аномалия: Резкий всплеск негатива (40%) в источнике vk.com. Основные ключевые слова: холодно, печка, автобус 404.".to_string(),
            "Позитив: Пользователи хвалят обновление приложения (28.11). Индекс удовлетворенности вырос на 5%.".to_string(),
        ],
        keywords: vec![
            keyword("Опоздание", 120, Tone::Negative, "Маршрут 404", "Жалобы коррелируют с утренними часами пик (8:00-9:30)."),
            keyword("Холодно", 85, Tone::Negative, "Печка", "В 70% случаев упоминается старый парк автобусов ЛиАЗ."),
            keyword("Грязь", 45, Tone::Negative, "Салон", "Чаще всего упоминается маршрут м19."),
            keyword("Быстро", 90, Tone::Positive, "Выделенка", "Позитивный отклик на введение новой полосы на Ленинском."),
            keyword("Комфорт", 60, Tone::Positive, "Новые автобусы", "Высокая оценка USB-зарядок в салоне."),
            keyword("Чисто", 50, Tone::Positive, "Уборка", "Замечено улучшение после смены подрядчика по клинингу."),
        ],
        records,
    }
}

fn parks_project(rng: &mut StdRng) -> Project {
    Project {
        id: "2".to_string(),
        title: "Отзывы: Парки МСК".to_string(),
        description: "Мониторинг состояния парковых зон".to_string(),
        kpi: Kpi {
            total_reviews: 850,
            nps: 42,
            nps_delta: 5,
            avg_confidence: 92,
        },
        files: vec![file("f3", "parks_survey_q3.csv", "15.11.2023", 850)],
        ai_insights: vec![
            "Успех: Реконструкция парка 'Сокольники' получила 90% положительных отзывов.".to_string(),
            "Проблема: Жалобы на недостаточное освещение в вечернее время в Парке Горького.".to_string(),
        ],
        keywords: vec![
            keyword("Темно", 30, Tone::Negative, "Фонари", "Локализовано в зоне прудов."),
            keyword("Красиво", 150, Tone::Positive, "Осень", "Много фото-контента в соцсетях."),
        ],
        records: generate_records("200", 12, "f3", rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_records_follow_the_cycles() {
        let mut rng = StdRng::seed_from_u64(1);
        let records = generate_records("100", 30, "f1", &mut rng);
        assert_eq!(records.len(), 30);
        assert_eq!(records[0].id, "100-1");
        assert_eq!(records[4].id, "100-5");
        assert_eq!(records[4].sentiment, Sentiment::Negative);
        assert_eq!(records[1].sentiment, Sentiment::Positive);
        assert_eq!(records[3].sentiment, Sentiment::Neutral);
        assert_eq!(records[1].source, Channel::MosRu);
        // index 15 wraps the text table but is not marked as a duplicate yet
        assert_eq!(records[15].text, TEXTS[0]);
        assert!(records[16].text.ends_with("(дубль 1)"));
        assert!(records
            .iter()
            .all(|r| (0.6..0.99).contains(&r.confidence) && r.file_id == "f1"));
    }

    #[test]
    fn sample_set_is_reproducible() {
        assert_eq!(sample_projects(), sample_projects());
        let projects = sample_projects();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].records.len(), 50);
        assert_eq!(projects[1].records.len(), 12);
    }
}
