use std::sync::Arc;

use adw::prelude::*;
use relm4::factory::FactoryVecDeque;
use relm4::prelude::*;

use crate::api::ApiClient;
use crate::services::history::{self, HistoryError, HistorySnapshot};
use crate::ui::message_bubble::MessageBubble;

const CONNECT_FAILED: &str = "Failed to connect to server. Please try again.";

pub struct HistoryView {
    api: Arc<ApiClient>,
    email: String,
    loading: bool,
    checking: bool,
    status_message: Option<String>,
    status_is_error: bool,
    user_name: String,
    panel_visible: bool,
    messages: FactoryVecDeque<MessageBubble>,
    scrolled_window: gtk::ScrolledWindow,
    list_stack: gtk::Stack,
}

#[derive(Debug)]
pub enum HistoryMsg {
    EmailChanged(String),
    Submit,
    CheckReplies,
    ScrollToBottom,
}

#[derive(Debug)]
pub enum HistoryCmd {
    Loaded(HistorySnapshot),
    LoadFailed(HistoryError),
    CheckCompleted(String),
    CheckFailed(String),
}

#[relm4::component(pub, async)]
impl AsyncComponent for HistoryView {
    type Init = Arc<ApiClient>;
    type Input = HistoryMsg;
    type Output = ();
    type CommandOutput = HistoryCmd;

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 12,

            adw::PreferencesGroup {
                set_title: "View Conversation History",
                set_description: Some("Enter your registered email to see your conversation"),

                adw::EntryRow {
                    set_title: "Email",
                    connect_changed[sender] => move |entry| {
                        sender.input(HistoryMsg::EmailChanged(entry.text().to_string()));
                    },
                    connect_entry_activated => HistoryMsg::Submit,
                },
            },

            // Status area
            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 8,
                set_halign: gtk::Align::Start,
                #[watch]
                set_visible: model.loading || model.status_message.is_some(),

                gtk::Spinner {
                    #[watch]
                    set_spinning: model.loading,
                    #[watch]
                    set_visible: model.loading,
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
                set_label: if model.loading { "Loading..." } else { "View History" },
                #[watch]
                set_sensitive: !model.loading,
                connect_clicked => HistoryMsg::Submit,
            },

            gtk::Revealer {
                set_transition_type: gtk::RevealerTransitionType::SlideDown,
                #[watch]
                set_reveal_child: model.panel_visible,

                #[wrap(Some)]
                set_child = &gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 8,
                    add_css_class: "conversation-panel",

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 8,

                        gtk::Label {
                            #[watch]
                            set_label: &format!("Conversation with {}", model.user_name),
                            add_css_class: "heading",
                            set_halign: gtk::Align::Start,
                            set_hexpand: true,
                            set_ellipsize: gtk::pango::EllipsizeMode::End,
                        },

                        gtk::Button {
                            add_css_class: "flat",
                            #[watch]
                            set_label: if model.checking { "Checking..." } else { "Check for replies" },
                            #[watch]
                            set_sensitive: !model.checking && !model.loading,
                            connect_clicked => HistoryMsg::CheckReplies,
                        },
                    },

                    #[local_ref]
                    list_stack -> gtk::Stack {},
                },
            },
        }
    }

    async fn init(
        api: Self::Init,
        root: Self::Root,
        sender: AsyncComponentSender<Self>,
    ) -> AsyncComponentParts<Self> {
        let messages = FactoryVecDeque::builder()
            .launch(gtk::Box::default())
            .detach();

        let message_list = messages.widget().clone();
        message_list.set_orientation(gtk::Orientation::Vertical);
        message_list.set_spacing(0);
        message_list.set_margin_top(8);
        message_list.set_margin_bottom(8);

        let scrolled_window = gtk::ScrolledWindow::new();
        scrolled_window.set_hscrollbar_policy(gtk::PolicyType::Never);
        scrolled_window.set_min_content_height(320);
        scrolled_window.set_max_content_height(480);
        scrolled_window.set_propagate_natural_height(true);
        scrolled_window.set_child(Some(&message_list));

        let empty_page = adw::StatusPage::new();
        empty_page.set_title("No conversation history yet.");
        empty_page.set_description(Some(
            "Send an email to your support partner to start your conversation!",
        ));
        empty_page.set_icon_name(Some("mail-unread-symbolic"));

        let list_stack = gtk::Stack::new();
        list_stack.set_transition_type(gtk::StackTransitionType::Crossfade);
        list_stack.set_vhomogeneous(false);
        list_stack.add_named(&empty_page, Some("empty"));
        list_stack.add_named(&scrolled_window, Some("messages"));

        let model = Self {
            api,
            email: String::new(),
            loading: false,
            checking: false,
            status_message: None,
            status_is_error: false,
            user_name: String::new(),
            panel_visible: false,
            messages,
            scrolled_window: scrolled_window.clone(),
            list_stack: list_stack.clone(),
        };

        let widgets = view_output!();

        AsyncComponentParts { model, widgets }
    }

    async fn update(
        &mut self,
        msg: Self::Input,
        sender: AsyncComponentSender<Self>,
        _root: &Self::Root,
    ) {
        match msg {
            HistoryMsg::EmailChanged(text) => self.email = text,
            HistoryMsg::Submit => {
                self.status_message = None;
                self.panel_visible = false;
                self.loading = true;
                self.spawn_load(&sender);
            }
            HistoryMsg::CheckReplies => {
                self.checking = true;
                self.status_message = None;

                let api = self.api.clone();
                sender.command(move |out, _| {
                    Box::pin(async move {
                        match api.check_emails().await {
                            Ok(message) => {
                                out.send(HistoryCmd::CheckCompleted(message)).unwrap()
                            }
                            Err(e) if e.is_transport() => {
                                tracing::warn!("email check failed: {}", e);
                                out.send(HistoryCmd::CheckFailed(CONNECT_FAILED.to_string()))
                                    .unwrap()
                            }
                            Err(e) => {
                                out.send(HistoryCmd::CheckFailed(e.to_string())).unwrap()
                            }
                        }
                    })
                });
            }
            HistoryMsg::ScrollToBottom => {
                let adj = self.scrolled_window.vadjustment();
                glib::idle_add_local_once(move || {
                    adj.set_value(adj.upper());
                });
            }
        }
    }

    async fn update_cmd(
        &mut self,
        msg: Self::CommandOutput,
        sender: AsyncComponentSender<Self>,
        _root: &Self::Root,
    ) {
        match msg {
            HistoryCmd::Loaded(snapshot) => {
                self.loading = false;
                tracing::debug!(
                    "loaded {} message(s) for {}",
                    snapshot.messages.len(),
                    snapshot.user.email
                );
                self.user_name = snapshot.user.name.clone();

                let is_empty = snapshot.messages.is_empty();
                let mut guard = self.messages.guard();
                guard.clear();
                for message in snapshot.messages {
                    guard.push_back(message);
                }
                drop(guard);

                if is_empty {
                    self.list_stack.set_visible_child_name("empty");
                } else {
                    self.list_stack.set_visible_child_name("messages");
                    sender.input(HistoryMsg::ScrollToBottom);
                }
                self.panel_visible = true;
            }
            HistoryCmd::LoadFailed(error) => {
                self.loading = false;
                if let HistoryError::Connection(source) = &error {
                    tracing::warn!("history request failed: {}", source);
                }
                self.status_message = Some(error.to_string());
                self.status_is_error = true;
            }
            HistoryCmd::CheckCompleted(message) => {
                self.checking = false;
                self.status_message = Some(message);
                self.status_is_error = false;
                // Pick up anything the poll just ingested
                self.loading = true;
                self.spawn_load(&sender);
            }
            HistoryCmd::CheckFailed(text) => {
                self.checking = false;
                self.status_message = Some(text);
                self.status_is_error = true;
            }
        }
    }
}

impl HistoryView {
    fn spawn_load(&self, sender: &AsyncComponentSender<Self>) {
        let api = self.api.clone();
        let email = self.email.trim().to_string();
        sender.command(move |out, _| {
            Box::pin(async move {
                match history::load_history(&api, &email).await {
                    Ok(snapshot) => out.send(HistoryCmd::Loaded(snapshot)).unwrap(),
                    Err(e) => out.send(HistoryCmd::LoadFailed(e)).unwrap(),
                }
            })
        });
    }
}
