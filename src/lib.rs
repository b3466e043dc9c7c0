pub mod shared {
    pub mod core {
        pub mod branch;
        pub mod request_guard;
    }
    pub mod infrastructure {
        pub mod change_feed;
        pub mod data_store;
        pub mod identity;
        pub mod notification_outbox;
    }
}

pub mod modules {
    pub mod booking {
        pub mod core {
            pub mod availability;
            pub mod birthday;
            pub mod calendar;
            pub mod conflict_guard;
            pub mod contact;
            pub mod model;
            pub mod notification;
            pub mod policy;
            pub mod service;
            pub mod slots;
        }
        pub mod use_cases {
            pub mod staff_error;

            pub mod register_client {
                pub mod command;
                pub mod handler;
            }
            pub mod start_session {
                pub mod handler;
                pub mod session;
            }
            pub mod list_barbers {
                pub mod handler;
            }
            pub mod list_available_slots {
                pub mod handler;
                pub mod picker;
            }
            pub mod book_appointment {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod stage;
            }
            pub mod manage_appointments {
                pub mod handler;
            }
            pub mod manage_clients {
                pub mod handler;
            }
            pub mod manage_promotions {
                pub mod command;
                pub mod handler;
            }
            pub mod check_birthdays {
                pub mod handler;
            }
            pub mod book_birthday_cut {
                pub mod command;
                pub mod handler;
            }
            pub mod staff_agenda {
                pub mod agenda;
            }
        }
    }
}

pub mod shell;
