use std::sync::Arc;

use adw::prelude::*;
use relm4::prelude::*;

use crate::api::ApiClient;
use crate::models::RegistrationRequest;

const CONNECT_FAILED: &str = "Failed to connect to server. Please try again.";

pub struct RegistrationForm {
    api: Arc<ApiClient>,
    email: String,
    name: String,
    occupation: String,
    interests: String,
    hobbies: String,
    personality: String,
    submitting: bool,
    status_message: Option<String>,
    status_is_error: bool,
    email_row: adw::EntryRow,
    name_row: adw::EntryRow,
    occupation_row: adw::EntryRow,
    interests_row: adw::EntryRow,
    hobbies_row: adw::EntryRow,
    personality_row: adw::EntryRow,
}

#[derive(Debug)]
pub enum RegistrationMsg {
    EmailChanged(String),
    NameChanged(String),
    OccupationChanged(String),
    InterestsChanged(String),
    HobbiesChanged(String),
    PersonalityChanged(String),
    Submit,
}

#[derive(Debug)]
pub enum RegistrationCmd {
    Registered(String),
    Rejected(String),
    ConnectionFailed,
}

#[relm4::component(pub, async)]
impl AsyncComponent for RegistrationForm {
    type Init = Arc<ApiClient>;
    type Input = RegistrationMsg;
    type Output = ();
    type CommandOutput = RegistrationCmd;

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 12,

            adw::PreferencesGroup {
                set_title: "Register",
                set_description: Some("Tell your support partner a little about yourself"),

                #[name = "email_row"]
                adw::EntryRow {
                    set_title: "Email",
                    connect_changed[sender] => move |entry| {
                        sender.input(RegistrationMsg::EmailChanged(entry.text().to_string()));
                    },
                },

                #[name = "name_row"]
                adw::EntryRow {
                    set_title: "Name",
                    connect_changed[sender] => move |entry| {
                        sender.input(RegistrationMsg::NameChanged(entry.text().to_string()));
                    },
                },

                #[name = "occupation_row"]
                adw::EntryRow {
                    set_title: "Occupation",
                    connect_changed[sender] => move |entry| {
                        sender.input(RegistrationMsg::OccupationChanged(entry.text().to_string()));
                    },
                },

                #[name = "interests_row"]
                adw::EntryRow {
                    set_title: "Interests",
                    connect_changed[sender] => move |entry| {
                        sender.input(RegistrationMsg::InterestsChanged(entry.text().to_string()));
                    },
                },

                #[name = "hobbies_row"]
                adw::EntryRow {
                    set_title: "Hobbies",
                    connect_changed[sender] => move |entry| {
                        sender.input(RegistrationMsg::HobbiesChanged(entry.text().to_string()));
                    },
                },

                #[name = "personality_row"]
                adw::EntryRow {
                    set_title: "Personality",
                    connect_changed[sender] => move |entry| {
                        sender.input(RegistrationMsg::PersonalityChanged(entry.text().to_string()));
                    },
                },
            },

            // Status area
            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 8,
                set_halign: gtk::Align::Start,
                #[watch]
                set_visible: model.submitting || model.status_message.is_some(),

                gtk::Spinner {
                    #[watch]
                    set_spinning: model.submitting,
                    #[watch]
                    set_visible: model.submitting,
                },

                gtk::Label {
                    #[watch]
                    set_label: model.status_message.as_deref().unwrap_or(""),
                    #[watch]
                    set_css_classes: if model.status_is_error { &["error"] } else { &["success"] },
                    set_wrap: true,
                    set_xalign: 0.0,
                },
            },

            gtk::Button {
                set_halign: gtk::Align::End,
                add_css_class: "suggested-action",
                add_css_class: "pill",
                #[watch]
                set_label: if model.submitting { "Registering..." } else { "Register" },
                #[watch]
                set_sensitive: !model.submitting,
                connect_clicked => RegistrationMsg::Submit,
            },
        }
    }

    async fn init(
        api: Self::Init,
        root: Self::Root,
        sender: AsyncComponentSender<Self>,
    ) -> AsyncComponentParts<Self> {
        let model = Self {
            api,
            email: String::new(),
            name: String::new(),
            occupation: String::new(),
            interests: String::new(),
            hobbies: String::new(),
            personality: String::new(),
            submitting: false,
            status_message: None,
            status_is_error: false,
            email_row: adw::EntryRow::new(),
            name_row: adw::EntryRow::new(),
            occupation_row: adw::EntryRow::new(),
            interests_row: adw::EntryRow::new(),
            hobbies_row: adw::EntryRow::new(),
            personality_row: adw::EntryRow::new(),
        };

        let widgets = view_output!();

        // Keep references to the rows so a successful submission can clear them
        let mut model = model;
        model.email_row = widgets.email_row.clone();
        model.name_row = widgets.name_row.clone();
        model.occupation_row = widgets.occupation_row.clone();
        model.interests_row = widgets.interests_row.clone();
        model.hobbies_row = widgets.hobbies_row.clone();
        model.personality_row = widgets.personality_row.clone();

        AsyncComponentParts { model, widgets }
    }

    async fn update(
        &mut self,
        msg: Self::Input,
        sender: AsyncComponentSender<Self>,
        _root: &Self::Root,
    ) {
        match msg {
            RegistrationMsg::EmailChanged(text) => self.email = text,
            RegistrationMsg::NameChanged(text) => self.name = text,
            RegistrationMsg::OccupationChanged(text) => self.occupation = text,
            RegistrationMsg::InterestsChanged(text) => self.interests = text,
            RegistrationMsg::HobbiesChanged(text) => self.hobbies = text,
            RegistrationMsg::PersonalityChanged(text) => self.personality = text,
            RegistrationMsg::Submit => {
                self.status_message = None;
                self.submitting = true;

                let request = RegistrationRequest {
                    email: self.email.trim().to_string(),
                    name: self.name.trim().to_string(),
                    occupation: self.occupation.trim().to_string(),
                    interests: self.interests.trim().to_string(),
                    hobbies: self.hobbies.trim().to_string(),
                    personality: self.personality.trim().to_string(),
                };

                let api = self.api.clone();
                sender.command(move |out, _| {
                    Box::pin(async move {
                        match api.register(&request).await {
                            Ok(message) => {
                                out.send(RegistrationCmd::Registered(message)).unwrap()
                            }
                            Err(e) if e.is_transport() => {
                                tracing::warn!("registration request failed: {}", e);
                                out.send(RegistrationCmd::ConnectionFailed).unwrap()
                            }
                            Err(e) => out.send(RegistrationCmd::Rejected(e.to_string())).unwrap(),
                        }
                    })
                });
            }
        }
    }

    async fn update_cmd(
        &mut self,
        msg: Self::CommandOutput,
        _sender: AsyncComponentSender<Self>,
        _root: &Self::Root,
    ) {
        match msg {
            RegistrationCmd::Registered(message) => {
                self.submitting = false;
                self.status_message = Some(message);
                self.status_is_error = false;
                self.clear_fields();
            }
            RegistrationCmd::Rejected(text) => {
                self.submitting = false;
                self.status_message = Some(text);
                self.status_is_error = true;
            }
            RegistrationCmd::ConnectionFailed => {
                self.submitting = false;
                self.status_message = Some(CONNECT_FAILED.to_string());
                self.status_is_error = true;
            }
        }
    }
}

impl RegistrationForm {
    fn clear_fields(&mut self) {
        for row in [
            &self.email_row,
            &self.name_row,
            &self.occupation_row,
            &self.interests_row,
            &self.hobbies_row,
            &self.personality_row,
        ] {
            row.set_text("");
        }
        self.email.clear();
        self.name.clear();
        self.occupation.clear();
        self.interests.clear();
        self.hobbies.clear();
        self.personality.clear();
    }
}
