//! Embedded fallback dataset.
//!
//! When the offers endpoint is unreachable the catalogue degrades to this
//! fixed list instead of surfacing an error. The records are kept in raw
//! offer form and run through the same adapter as network data, so the
//! degraded path exercises exactly the pipeline the live path does.

use serde_json::Value;

use super::offer::{RawOffer, RawReview, RawSeller};

fn offer(id: u64, title: &str, price: f64) -> RawOffer {
    RawOffer {
        id: Some(Value::from(id)),
        title: Some(title.to_owned()),
        price: Some(Value::from(price)),
        ..RawOffer::default()
    }
}

fn seller(id: u64, name: &str, verified: bool) -> Option<RawSeller> {
    Some(RawSeller {
        id: Some(Value::from(id)),
        name: Some(name.to_owned()),
        is_verified: Some(verified),
        ..RawSeller::default()
    })
}

fn review(rating: u32) -> RawReview {
    RawReview {
        rating: Some(Value::from(rating)),
        comment: None,
    }
}

/// The fixed offer list served when the remote source is down.
#[must_use]
pub fn fallback_offers() -> Vec<RawOffer> {
    vec![
        RawOffer {
            description: Some(
                "Complete Figma design system with 400+ components, tokens, and \
                 dark mode variants ready for product teams."
                    .to_owned(),
            ),
            category: Some("design".to_owned()),
            tags: vec!["design".to_owned(), "figma".to_owned(), "ui-kit".to_owned()],
            localisation: Some("Paris".to_owned()),
            is_featured: Some(true),
            created_at: Some("2026-05-14T09:30:00Z".to_owned()),
            updated_at: Some("2026-06-02T16:00:00Z".to_owned()),
            published_at: Some("2026-05-15T08:00:00Z".to_owned()),
            user: seller(11, "Claire Dubois", true),
            reviews: vec![review(5), review(5), review(4)],
            sales_count: Some(Value::from(64)),
            ..offer(101, "Premium Figma UI Kit", 89.0)
        },
        RawOffer {
            description: Some(
                "Eight-week live course covering React, TypeScript, and testing \
                 practice, with lifetime access to the recordings."
                    .to_owned(),
            ),
            category: Some("course".to_owned()),
            subcategory: Some("Frontend".to_owned()),
            tags: vec![
                "react".to_owned(),
                "typescript".to_owned(),
                "formation".to_owned(),
            ],
            localisation: Some("Bruxelles".to_owned()),
            is_trending: Some(true),
            created_at: Some("2026-06-20T10:00:00Z".to_owned()),
            updated_at: Some("2026-07-01T12:00:00Z".to_owned()),
            user: seller(12, "Jonas Peeters", true),
            reviews: vec![review(5), review(4), review(4), review(5)],
            sales_count: Some(Value::from(210)),
            ..offer(102, "React & TypeScript Masterclass", 149.0)
        },
        RawOffer {
            description: Some(
                "Technical SEO audit with a prioritised fix list, delivered as a \
                 workshop within 48 hours."
                    .to_owned(),
            ),
            category: Some("marketing".to_owned()),
            tags: vec!["seo".to_owned(), "marketing".to_owned(), "consultation".to_owned()],
            localisation: Some("London".to_owned()),
            price_type: Some("quote".to_owned()),
            created_at: Some("2026-04-03T14:20:00Z".to_owned()),
            updated_at: Some("2026-04-03T14:20:00Z".to_owned()),
            user: seller(13, "Amara Okafor", false),
            ..offer(103, "SEO Audit Sprint", 0.0)
        },
        RawOffer {
            description: Some(
                "One-to-one product strategy consulting for early-stage teams, \
                 booked in half-day blocks."
                    .to_owned(),
            ),
            category: Some("consulting".to_owned()),
            tags: vec!["consultation".to_owned(), "strategy".to_owned()],
            localisation: Some("Genève".to_owned()),
            price_type: Some("subscription".to_owned()),
            is_featured: Some(true),
            created_at: Some("2026-03-11T08:45:00Z".to_owned()),
            updated_at: Some("2026-05-30T11:00:00Z".to_owned()),
            user: seller(14, "Lukas Meier", true),
            reviews: vec![review(5), review(5)],
            ..offer(104, "Product Strategy Sessions", 320.0)
        },
        RawOffer {
            description: Some(
                "Second-hand Samsung Galaxy S23, 256 GB, battery health 94%, \
                 sold with original charger and invoice."
                    .to_owned(),
            ),
            category: Some("other".to_owned()),
            brand: Some("Samsung".to_owned()),
            model: Some("Galaxy S23".to_owned()),
            condition: Some("good".to_owned()),
            tags: vec!["samsung".to_owned(), "occasion".to_owned(), "garantie".to_owned()],
            localisation: Some("Lyon".to_owned()),
            created_at: Some("2026-07-18T19:10:00Z".to_owned()),
            updated_at: Some("2026-07-19T07:00:00Z".to_owned()),
            user: seller(15, "Nadia Benali", false),
            sales_count: Some(Value::from(1)),
            ..offer(105, "Samsung Galaxy S23 256GB", 420.0)
        },
        RawOffer {
            description: Some(
                "Self-hosted invoicing software licence with one year of \
                 updates and priority support."
                    .to_owned(),
            ),
            category: Some("software".to_owned()),
            tags: vec!["invoicing".to_owned(), "self-hosted".to_owned()],
            localisation: Some("Berlin".to_owned()),
            is_trending: Some(true),
            created_at: Some("2026-06-28T09:00:00Z".to_owned()),
            updated_at: Some("2026-07-02T10:30:00Z".to_owned()),
            user: seller(16, "Greta Hoffmann", true),
            reviews: vec![review(4), review(4), review(3)],
            sales_count: Some(Value::from(95)),
            ..offer(106, "Billing Suite Licence", 59.0)
        },
        RawOffer {
            description: Some(
                "Notion template pack for freelancers: CRM, invoicing tracker, \
                 and weekly review dashboards."
                    .to_owned(),
            ),
            category: Some("digital_product".to_owned()),
            tags: vec!["notion".to_owned(), "productivity".to_owned()],
            localisation: Some("Montréal".to_owned()),
            price_type: Some("fixed".to_owned()),
            created_at: Some("2026-05-02T13:00:00Z".to_owned()),
            updated_at: Some("2026-05-02T13:00:00Z".to_owned()),
            user: seller(17, "Sophie Tremblay", false),
            sales_count: Some(Value::from(340)),
            reviews: vec![review(5), review(4)],
            ..offer(107, "Freelance Operating System", 29.0)
        },
        RawOffer {
            description: Some(
                "Weekly apartment cleaning service, supplies included, insured \
                 and background-checked staff."
                    .to_owned(),
            ),
            category: Some("service".to_owned()),
            tags: vec!["cleaning".to_owned(), "livraison".to_owned()],
            localisation: Some("Madrid".to_owned()),
            price_type: Some("subscription".to_owned()),
            created_at: Some("2026-02-22T07:30:00Z".to_owned()),
            updated_at: Some("2026-06-15T09:00:00Z".to_owned()),
            user: seller(18, "Carmen Ruiz", true),
            ..offer(108, "Home Cleaning Subscription", 75.0)
        },
        RawOffer {
            description: Some(
                "Hand-drawn brand illustration set, source files included, \
                 commercial licence."
                    .to_owned(),
            ),
            category: Some("design".to_owned()),
            tags: vec!["illustration".to_owned(), "branding".to_owned(), "design".to_owned()],
            localisation: Some("Tokyo".to_owned()),
            is_featured: Some(true),
            is_trending: Some(true),
            created_at: Some("2026-07-25T11:40:00Z".to_owned()),
            updated_at: Some("2026-07-26T08:15:00Z".to_owned()),
            user: seller(19, "Yuki Tanaka", true),
            reviews: vec![review(5)],
            sales_count: Some(Value::from(48)),
            ..offer(109, "Brand Illustration Pack", 180.0)
        },
        RawOffer {
            description: Some(
                "Refurbished Apple MacBook Air M2, 16 GB RAM, new keyboard, \
                 six months of warranty."
                    .to_owned(),
            ),
            category: Some("other".to_owned()),
            brand: Some("Apple".to_owned()),
            model: Some("MacBook Air M2".to_owned()),
            condition: Some("like_new".to_owned()),
            tags: vec!["apple".to_owned(), "occasion".to_owned(), "garantie".to_owned()],
            localisation: Some("Amsterdam".to_owned()),
            created_at: Some("2026-07-29T15:55:00Z".to_owned()),
            updated_at: Some("2026-07-30T10:00:00Z".to_owned()),
            user: seller(20, "Daan Visser", false),
            reviews: vec![review(5), review(4), review(5)],
            sales_count: Some(Value::from(3)),
            ..offer(110, "Apple MacBook Air M2 16GB", 899.0)
        },
    ]
}
