use crate::modules::booking::core::model::AppointmentStatus;
use crate::modules::booking::core::policy::BookingPolicy;
use crate::modules::booking::core::service::Service;
use crate::modules::booking::use_cases::book_appointment::handler::BookingError;
use crate::modules::booking::use_cases::book_birthday_cut::command::BookBirthdayCut;
use crate::modules::booking::use_cases::manage_promotions::command::CreatePromotion;
use crate::shared::core::branch::Branch;
use crate::shell::BookingApp;
use crate::tests::fixtures::barbers::BarberBuilder;
use crate::tests::fixtures::clients::ClientBuilder;
use crate::tests::fixtures::commands::book_appointment::BookAppointmentBuilder;
use crate::tests::fixtures::commands::register_client::RegisterClientBuilder;
use chrono::{NaiveDate, NaiveTime, Utc};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Monday.
fn today() -> NaiveDate {
    date(2025, 6, 9)
}

#[tokio::test]
async fn staff_follow_a_booking_from_arrival_to_completion() {
    let app = BookingApp::in_memory(BookingPolicy::default());
    app.store.add_barber(BarberBuilder::new().build()).await;
    let agenda = app.staff_agenda(Branch::Brasil);
    agenda.refresh(today()).await.unwrap();

    let client = app
        .register_client
        .handle(RegisterClientBuilder::new().build(), today())
        .await
        .unwrap();
    let outcome = app
        .book_appointment
        .handle(BookAppointmentBuilder::new().build(), today(), Utc::now())
        .await
        .unwrap();

    assert!(agenda.apply_pending(today()).await.unwrap() > 0);
    assert!(agenda.take_alert());
    let entries = agenda.entries().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].client_name, "Camila Soto");
    assert_eq!(entries[0].barber_name, "Carlos");

    app.appointments.confirm(&outcome.appointment.id).await.unwrap();
    agenda.apply_pending(today()).await.unwrap();
    assert_eq!(
        agenda.entries().await[0].appointment.status,
        AppointmentStatus::Confirmed
    );
    assert!(!agenda.take_alert());

    app.appointments.complete(&outcome.appointment.id).await.unwrap();
    agenda.apply_pending(today()).await.unwrap();
    assert!(agenda.entries().await.is_empty());
    let clients = app.clients.list().await.unwrap();
    assert_eq!(clients[0].id, client.id);
    assert_eq!(clients[0].visit_count, 1);
}

#[tokio::test]
async fn a_blocked_client_cannot_book_until_unblocked() {
    let app = BookingApp::in_memory(BookingPolicy::default());
    app.store.add_barber(BarberBuilder::new().build()).await;
    let client = app
        .register_client
        .handle(RegisterClientBuilder::new().build(), today())
        .await
        .unwrap();

    app.clients.set_blocked(&client.id, true).await.unwrap();
    let session = app.session.start(today()).await.unwrap().unwrap();
    assert!(!session.can_book());
    let refused = app
        .book_appointment
        .handle(BookAppointmentBuilder::new().build(), today(), Utc::now())
        .await;
    assert!(matches!(refused, Err(BookingError::BlockedClient)));
    assert_eq!(app.store.appointment_count().await, 0);

    app.clients.set_blocked(&client.id, false).await.unwrap();
    app.book_appointment
        .handle(BookAppointmentBuilder::new().build(), today(), Utc::now())
        .await
        .unwrap();
    assert_eq!(app.store.appointment_count().await, 1);
}

#[tokio::test]
async fn staff_book_the_birthday_cut_for_todays_birthdays() {
    let app = BookingApp::in_memory(BookingPolicy::default());
    app.store
        .add_barber(BarberBuilder::new().offers_free_birthday_cut(true).build())
        .await;
    app.store
        .add_client(
            ClientBuilder::new()
                .birth_date(Some(date(1995, 6, 9)))
                .visit_count(4)
                .build(),
        )
        .await;
    app.store
        .add_client(
            ClientBuilder::new()
                .id("client-0002")
                .name("Diego Fuentes")
                .phone("987111222")
                .email("diego@example.com")
                .birth_date(Some(date(1990, 1, 2)))
                .build(),
        )
        .await;

    let birthdays = app.birthdays.handle(today()).await.unwrap();
    assert_eq!(birthdays.len(), 1);
    assert!(birthdays[0].promotion.is_eligible());

    let appointment = app
        .birthday_cuts
        .handle(
            BookBirthdayCut {
                client_id: birthdays[0].client.id.clone(),
                barber_id: "barber-0001".into(),
                date: today(),
                time: hm(16, 30),
                notes: String::new(),
            },
            today(),
            Utc::now(),
        )
        .await
        .unwrap();
    assert_eq!(appointment.service, Service::FreeBirthdayCut);
    assert_eq!(appointment.status, AppointmentStatus::Confirmed);

    app.appointments.free_slot(&appointment.id).await.unwrap();
    assert_eq!(app.store.appointment_count().await, 0);
}

#[tokio::test]
async fn promotions_stay_public_until_they_end() {
    let app = BookingApp::in_memory(BookingPolicy::default());
    let promotion = app
        .promotions
        .create(CreatePromotion {
            title: "Martes de barba".into(),
            description: "20% en perfilado de barba".into(),
            starts_on: date(2025, 6, 1),
            ends_on: date(2025, 6, 30),
            branch: Branch::ManuelRodriguez,
            image_url: Some("https://example.com/barba.png".into()),
        })
        .await
        .unwrap();

    let visible = app.promotions.active(None, today()).await.unwrap();
    assert_eq!(visible, vec![promotion.clone()]);
    assert!(
        app.promotions
            .active(Some(Branch::Brasil), today())
            .await
            .unwrap()
            .is_empty()
    );
    assert!(app.promotions.active(None, date(2025, 7, 1)).await.unwrap().is_empty());

    app.promotions.delete(&promotion.id).await.unwrap();
    assert!(app.promotions.active(None, today()).await.unwrap().is_empty());
}
