//! First-run database seeding.
//!
//! Creates the initial admin account and, unless disabled, the reference
//! category tree and a pair of published starter articles. Every step is
//! idempotent so the seed can run on each startup.

use sqlx::PgPool;
use thiserror::Error;

use domain::models::Role;
use persistence::repositories::{
    ArticleRepository, CategoryRepository, NewArticle, NewCategory, UserRepository,
};
use shared::password::{hash_password, PasswordError};
use shared::slug::slugify;

use crate::config::BootstrapConfig;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordError),
}

struct SeedCategory {
    code: &'static str,
    name: &'static str,
    icon: &'static str,
    description: &'static str,
}

const SEED_CATEGORIES: &[SeedCategory] = &[
    SeedCategory {
        code: "12.14",
        name: "Проблемы с уборкой подъезда",
        icon: "Sparkles",
        description: "Обращения по вопросам уборки и санитарного состояния подъездов",
    },
    SeedCategory {
        code: "12.1",
        name: "Вандализм",
        icon: "AlertTriangle",
        description: "Обращения о повреждении общедомового имущества",
    },
    SeedCategory {
        code: "12.6",
        name: "Неисправный домофон",
        icon: "Phone",
        description: "Обращения о проблемах с домофонной системой",
    },
    SeedCategory {
        code: "12.10",
        name: "Проблемы с входной дверью",
        icon: "DoorOpen",
        description: "Обращения о неисправностях входных дверей подъездов",
    },
    SeedCategory {
        code: "11.4.6",
        name: "Проблемы со счётчиками",
        icon: "Gauge",
        description: "Обращения по вопросам приборов учёта",
    },
    SeedCategory {
        code: "15.6",
        name: "Предоставление отчёта",
        icon: "FileText",
        description: "Запросы отчётной документации",
    },
    SeedCategory {
        code: "5.6",
        name: "Приборы учёта (ИПУ)",
        icon: "Calculator",
        description: "Обращения по индивидуальным приборам учёта",
    },
];

/// Seed the database with the admin account and reference content.
pub async fn seed(pool: &PgPool, config: &BootstrapConfig) -> Result<(), BootstrapError> {
    let users = UserRepository::new(pool.clone());

    let admin = match users.find_by_email(&config.admin_email).await? {
        Some(existing) => {
            tracing::debug!(email = %config.admin_email, "Admin account already present");
            existing
        }
        None => {
            let password_hash = hash_password(&config.admin_password)?;
            let created = users
                .create(
                    &config.admin_email,
                    &password_hash,
                    "Администратор",
                    Role::Admin.as_str(),
                )
                .await?;
            tracing::info!(email = %config.admin_email, "Created admin account");
            created
        }
    };

    if !config.seed_content {
        return Ok(());
    }

    let categories = CategoryRepository::new(pool.clone());
    for (index, cat) in SEED_CATEGORIES.iter().enumerate() {
        if categories.find_by_code(cat.code).await?.is_none() {
            categories
                .create(NewCategory {
                    code: cat.code.to_string(),
                    name: cat.name.to_string(),
                    slug: slugify(cat.name),
                    description: Some(cat.description.to_string()),
                    icon: Some(cat.icon.to_string()),
                    parent_id: None,
                    sort_order: index as i32,
                })
                .await?;
            tracing::info!(code = cat.code, "Created seed category");
        }
    }

    let articles = ArticleRepository::new(pool.clone());

    if articles
        .find_by_slug("instrukciya-uborka-podezda")
        .await?
        .is_none()
    {
        if let Some(cleaning) = categories.find_by_code("12.14").await? {
            articles
                .create(NewArticle {
                    category_id: cleaning.id,
                    title: "Инструкция по обработке обращений об уборке подъезда".to_string(),
                    slug: "instrukciya-uborka-podezda".to_string(),
                    summary: "Пошаговая инструкция для операторов по обработке жалоб на \
                              качество уборки подъездов и мест общего пользования."
                        .to_string(),
                    content: CLEANING_ARTICLE_CONTENT.to_string(),
                    response_template: Some(CLEANING_RESPONSE_TEMPLATE.to_string()),
                    legal_reference: Some("п. 11 ПП РФ № 491".to_string()),
                    keywords: ["уборка", "подъезд", "чистота", "мусор", "грязь"]
                        .iter()
                        .map(|k| k.to_string())
                        .collect(),
                    is_published: true,
                    author_id: admin.id,
                })
                .await?;
            tracing::info!("Created seed article: uborka podezda");
        }
    }

    if articles
        .find_by_slug("neispravnost-domofona")
        .await?
        .is_none()
    {
        if let Some(intercom) = categories.find_by_code("12.6").await? {
            articles
                .create(NewArticle {
                    category_id: intercom.id,
                    title: "Обработка обращений о неисправности домофона".to_string(),
                    slug: "neispravnost-domofona".to_string(),
                    summary: "Инструкция по работе с обращениями о неисправностях \
                              домофонной системы."
                        .to_string(),
                    content: INTERCOM_ARTICLE_CONTENT.to_string(),
                    response_template: Some(INTERCOM_RESPONSE_TEMPLATE.to_string()),
                    legal_reference: None,
                    keywords: ["домофон", "связь", "дверь", "ключ", "брелок"]
                        .iter()
                        .map(|k| k.to_string())
                        .collect(),
                    is_published: true,
                    author_id: admin.id,
                })
                .await?;
            tracing::info!("Created seed article: neispravnost domofona");
        }
    }

    Ok(())
}

const CLEANING_ARTICLE_CONTENT: &str = r#"# Обработка обращений об уборке подъезда

## 1. Классификация обращения
Определите тип жалобы:
- Нерегулярная уборка
- Некачественная уборка
- Отсутствие уборки

## 2. Проверка информации
1. Уточните адрес и номер подъезда
2. Проверьте график уборки по данному адресу
3. Запросите информацию у ответственного сотрудника

## 3. Формирование ответа
Используйте шаблон ответа, указав:
- Дату последней уборки
- График уборки
- Принятые меры

## 4. Нормативная база
- Постановление Правительства РФ № 491
- Правила содержания общего имущества"#;

const CLEANING_RESPONSE_TEMPLATE: &str = r#"Уважаемый(ая) {ФИО}!

По Вашему обращению № {номер_обращения} от {дата} сообщаем следующее.

Управляющей компанией проведена проверка качества уборки по адресу: {адрес}.

График уборки мест общего пользования: ежедневно с 8:00 до 12:00.

По результатам проверки приняты следующие меры: проведён инструктаж с техническим персоналом, усилен контроль качества уборки.

С уважением,
Управляющая компания"#;

const INTERCOM_ARTICLE_CONTENT: &str = r#"# Неисправность домофона

## Типичные проблемы
- Не работает связь с квартирой
- Не открывается дверь
- Сломана панель вызова
- Проблемы с ключами/брелоками

## Порядок действий
1. Зафиксируйте характер неисправности
2. Направьте заявку в техническую службу
3. Сообщите заявителю о сроках устранения

## Сроки устранения
- Аварийные неисправности: 24 часа
- Текущий ремонт: до 5 рабочих дней"#;

const INTERCOM_RESPONSE_TEMPLATE: &str = r#"Уважаемый(ая) {ФИО}!

Ваше обращение о неисправности домофона по адресу {адрес} принято в работу.

Заявка передана в техническую службу. Ориентировочный срок устранения неисправности: {срок}.

Приносим извинения за доставленные неудобства.

С уважением,
Управляющая компания"#;
