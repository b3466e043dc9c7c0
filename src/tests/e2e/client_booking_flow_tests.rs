use crate::modules::booking::core::availability::{Availability, AvailabilityRequest, EmptyReason};
use crate::modules::booking::core::conflict_guard::Conflict;
use crate::modules::booking::core::model::AppointmentStatus;
use crate::modules::booking::core::policy::BookingPolicy;
use crate::modules::booking::core::service::Service;
use crate::modules::booking::use_cases::book_appointment::handler::BookingError;
use crate::shared::core::branch::Branch;
use crate::shell::BookingApp;
use crate::tests::fixtures::barbers::BarberBuilder;
use crate::tests::fixtures::commands::register_client::RegisterClientBuilder;
use chrono::{NaiveDate, NaiveTime, Utc, Weekday};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Thursday.
fn today() -> NaiveDate {
    date(2025, 6, 12)
}

async fn seeded_app() -> BookingApp {
    let app = BookingApp::in_memory(BookingPolicy::default());
    app.store.add_barber(BarberBuilder::new().build()).await;
    app.store
        .add_barber(
            BarberBuilder::new()
                .id("barber-martin")
                .name("Martín")
                .phone("955501234")
                .long_service_eligible(true)
                .build(),
        )
        .await;
    app.store
        .add_barber(
            BarberBuilder::new()
                .id("barber-jair")
                .name("Jair")
                .phone("955509876")
                .blocked_weekdays(vec![Weekday::Fri, Weekday::Sat])
                .build(),
        )
        .await;
    app
}

#[tokio::test]
async fn books_with_a_barber_who_skips_fridays() {
    let app = seeded_app().await;
    app.register_client
        .handle(RegisterClientBuilder::new().build(), today())
        .await
        .unwrap();

    let mut session = app.session.start(today()).await.unwrap().expect("signed in");
    let barbers = app
        .barbers
        .handle(Branch::Brasil, Some(Service::StandardCut))
        .await
        .unwrap();
    assert_eq!(barbers.len(), 3);
    session.select_branch(Branch::Brasil, barbers);

    session.select_barber("barber-0001");
    assert_eq!(session.legal_date(today()), date(2025, 6, 13));
    session.select_barber("barber-jair");
    let legal = session.legal_date(today());
    assert_eq!(legal, date(2025, 6, 16));

    let picker = app.slot_picker();
    let request = AvailabilityRequest {
        barber_id: "barber-jair".into(),
        date: legal,
        service: Service::StandardCut,
    };
    assert!(picker.refresh(&request, today()).await);
    assert!(picker.select(hm(9, 30)).await);

    let form = session
        .booking_form(
            Service::StandardCut,
            legal,
            picker.selected().await.unwrap(),
            "Degradado bajo",
        )
        .unwrap();
    let outcome = app
        .book_appointment
        .handle(form.clone(), today(), Utc::now())
        .await
        .unwrap();
    assert_eq!(outcome.appointment.status, AppointmentStatus::Pending);
    assert_eq!(outcome.appointment.date, date(2025, 6, 16));
    assert!(outcome.deep_link.starts_with("https://wa.me/+56955509876?text="));
    assert_eq!(app.outbox.rows.lock().await.len(), 1);

    picker.refresh(&request, today()).await;
    assert!(!picker.current().await.offers(hm(9, 30)));

    let again = app.book_appointment.handle(form, today(), Utc::now()).await;
    match again {
        Err(BookingError::Conflict(Conflict::ClientLimitReached {
            existing: Some(existing),
            ..
        })) => {
            assert_eq!(existing.barber_name, "Jair");
            assert_eq!(existing.time, hm(9, 30));
        }
        other => panic!("expected the client limit, got {other:?}"),
    }
    assert_eq!(app.store.appointment_count().await, 1);
}

#[tokio::test]
async fn a_permanent_pushes_other_services_to_the_afternoon() {
    let app = seeded_app().await;
    let friday = date(2025, 6, 13);

    app.register_client
        .handle(RegisterClientBuilder::new().build(), today())
        .await
        .unwrap();
    let mut first = app.session.start(today()).await.unwrap().unwrap();
    first.select_branch(
        Branch::Brasil,
        app.barbers
            .handle(Branch::Brasil, Some(Service::Permanent))
            .await
            .unwrap(),
    );
    assert!(first.select_barber("barber-martin").is_some());
    let permanent = first
        .booking_form(Service::Permanent, friday, hm(9, 30), "")
        .unwrap();
    app.book_appointment
        .handle(permanent, today(), Utc::now())
        .await
        .unwrap();

    app.session.sign_out().await.unwrap();
    app.register_client
        .handle(
            RegisterClientBuilder::new()
                .name("Diego Fuentes")
                .email("diego@example.com")
                .phone("987 111 222")
                .build(),
            today(),
        )
        .await
        .unwrap();
    let mut second = app.session.start(today()).await.unwrap().unwrap();
    second.select_branch(
        Branch::Brasil,
        app.barbers.handle(Branch::Brasil, None).await.unwrap(),
    );
    second.select_barber("barber-martin");

    let picker = app.slot_picker();
    let mut request = AvailabilityRequest {
        barber_id: "barber-martin".into(),
        date: second.legal_date(today()),
        service: Service::StandardCut,
    };
    picker.refresh(&request, today()).await;
    let availability = picker.current().await;
    assert_eq!(availability.slots().first(), Some(&hm(14, 30)));
    assert!(!availability.offers(hm(10, 30)));

    request.service = Service::Permanent;
    picker.refresh(&request, today()).await;
    assert_eq!(
        picker.current().await,
        Availability::Empty(EmptyReason::LongServiceAlreadyBooked)
    );

    let too_early = second
        .booking_form(Service::BeardTrim, friday, hm(10, 30), "")
        .unwrap();
    assert!(matches!(
        app.book_appointment.handle(too_early, today(), Utc::now()).await,
        Err(BookingError::Validation(_))
    ));

    let afternoon = second
        .booking_form(Service::BeardTrim, friday, hm(14, 30), "")
        .unwrap();
    let outcome = app
        .book_appointment
        .handle(afternoon, today(), Utc::now())
        .await
        .unwrap();
    assert_eq!(outcome.appointment.client_id, second.client.id);
    assert_eq!(app.store.appointment_count().await, 2);
}
