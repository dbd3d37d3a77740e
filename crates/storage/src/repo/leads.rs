use crate::{
    models::{SqlContactMessage, SqlDemoBooking, SqlNewsletterSignup},
    Db,
};
use chrono::Utc;
use domain::{
    protocol::{ContactRequest, DemoRequest},
    ContactMessage, DemoBooking, NewsletterSignup,
};

impl Db {
    pub async fn add_newsletter_signup(&self, email: &str) -> anyhow::Result<NewsletterSignup> {
        let row = sqlx::query_as::<_, SqlNewsletterSignup>(
            r#"
            INSERT INTO newsletter_signups (email, created_at)
            VALUES (?, ?)
            RETURNING id, email, created_at
            "#,
        )
        .bind(email.trim())
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    pub async fn list_newsletter_signups(&self) -> anyhow::Result<Vec<NewsletterSignup>> {
        let rows = sqlx::query_as::<_, SqlNewsletterSignup>(
            r#"
            SELECT id, email, created_at FROM newsletter_signups
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn add_demo_booking(&self, req: &DemoRequest) -> anyhow::Result<DemoBooking> {
        let row = sqlx::query_as::<_, SqlDemoBooking>(
            r#"
            INSERT INTO demo_bookings (first_name, last_name, email, number, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, first_name, last_name, email, number, created_at
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(req.email.trim())
        .bind(&req.number)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    pub async fn list_demo_bookings(&self) -> anyhow::Result<Vec<DemoBooking>> {
        let rows = sqlx::query_as::<_, SqlDemoBooking>(
            r#"
            SELECT id, first_name, last_name, email, number, created_at
            FROM demo_bookings
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn add_contact_message(
        &self,
        req: &ContactRequest,
    ) -> anyhow::Result<ContactMessage> {
        let row = sqlx::query_as::<_, SqlContactMessage>(
            r#"
            INSERT INTO contact_messages (
                first_name, last_name, email, number,
                residence, property, units, volume, message, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING
                id, first_name, last_name, email, number,
                residence, property, units, volume, message, created_at
            "#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(req.email.trim())
        .bind(&req.number)
        .bind(&req.residence)
        .bind(&req.property)
        .bind(&req.units)
        .bind(&req.volume)
        .bind(&req.message)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    pub async fn list_contact_messages(&self) -> anyhow::Result<Vec<ContactMessage>> {
        let rows = sqlx::query_as::<_, SqlContactMessage>(
            r#"
            SELECT
                id, first_name, last_name, email, number,
                residence, property, units, volume, message, created_at
            FROM contact_messages
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
