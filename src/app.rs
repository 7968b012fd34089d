use std::sync::Arc;

use adw::prelude::*;
use relm4::prelude::*;

use crate::api::ApiClient;
use crate::config;
use crate::ui::history_view::HistoryView;
use crate::ui::registration_form::RegistrationForm;

pub struct App {
    registration_form: AsyncController<RegistrationForm>,
    history_view: AsyncController<HistoryView>,
    toast_overlay: adw::ToastOverlay,
}

#[derive(Debug)]
pub enum AppMsg {
    ShowAbout,
}

#[derive(Debug)]
pub enum AppCmd {
    BackendUp(String),
    BackendDown(String),
}

#[relm4::component(pub, async)]
impl AsyncComponent for App {
    type Init = Arc<ApiClient>;
    type Input = AppMsg;
    type Output = ();
    type CommandOutput = AppCmd;

    view! {
        adw::ApplicationWindow {
            set_title: Some(config::APP_NAME),
            set_default_width: 560,
            set_default_height: 780,
            set_width_request: 420,
            set_height_request: 500,

            #[local_ref]
            toast_overlay -> adw::ToastOverlay {
                adw::ToolbarView {
                    add_top_bar = &adw::HeaderBar {
                        pack_end = &gtk::MenuButton {
                            set_icon_name: "open-menu-symbolic",
                            set_menu_model: Some(&menu),
                        },
                    },

                    #[wrap(Some)]
                    set_content = &gtk::ScrolledWindow {
                        set_hscrollbar_policy: gtk::PolicyType::Never,

                        adw::Clamp {
                            set_maximum_size: 560,
                            set_margin_top: 24,
                            set_margin_bottom: 32,
                            set_margin_start: 16,
                            set_margin_end: 16,

                            gtk::Box {
                                set_orientation: gtk::Orientation::Vertical,
                                set_spacing: 24,

                                gtk::Box {
                                    set_orientation: gtk::Orientation::Vertical,
                                    set_spacing: 8,
                                    set_halign: gtk::Align::Center,

                                    gtk::Label {
                                        set_label: config::APP_NAME,
                                        add_css_class: "title-1",
                                    },

                                    gtk::Label {
                                        set_label: "Your support partner, one email away",
                                        add_css_class: "dim-label",
                                    },
                                },

                                model.registration_form.widget().clone(),

                                gtk::Separator {
                                    set_orientation: gtk::Orientation::Horizontal,
                                },

                                model.history_view.widget().clone(),
                            },
                        },
                    },
                },
            },
        }
    }

    async fn init(
        api: Self::Init,
        root: Self::Root,
        sender: AsyncComponentSender<Self>,
    ) -> AsyncComponentParts<Self> {
        let registration_form = RegistrationForm::builder().launch(api.clone()).detach();
        let history_view = HistoryView::builder().launch(api.clone()).detach();

        let toast_overlay = adw::ToastOverlay::new();

        let menu = gio::Menu::new();
        menu.append(Some("About Penpal"), Some("app.about"));

        let model = App {
            registration_form,
            history_view,
            toast_overlay: toast_overlay.clone(),
        };

        let widgets = view_output!();

        let app = relm4::main_adw_application();
        let sender_about = sender.input_sender().clone();
        let about_action = gio::SimpleAction::new("about", None);
        about_action.connect_activate(move |_, _| {
            sender_about.send(AppMsg::ShowAbout).unwrap();
        });
        app.add_action(&about_action);

        // One startup probe so an unreachable backend is visible immediately;
        // it does not gate the forms.
        let api_probe = api.clone();
        sender.command(move |out, _| {
            Box::pin(async move {
                match api_probe.health().await {
                    Ok(status) => out.send(AppCmd::BackendUp(status)).unwrap(),
                    Err(e) => out.send(AppCmd::BackendDown(e.to_string())).unwrap(),
                }
            })
        });

        AsyncComponentParts { model, widgets }
    }

    async fn update(
        &mut self,
        msg: Self::Input,
        _sender: AsyncComponentSender<Self>,
        root: &Self::Root,
    ) {
        match msg {
            AppMsg::ShowAbout => {
                let about = adw::AboutWindow::builder()
                    .application_name(config::APP_NAME)
                    .version(config::VERSION)
                    .developer_name("Penpal Contributors")
                    .license_type(gtk::License::Gpl30)
                    .comments("A native desktop client for the Penpal support-email assistant")
                    .application_icon(config::APP_ID)
                    .build();
                about.set_transient_for(Some(root));
                about.present();
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
            AppCmd::BackendUp(status) => {
                tracing::info!("backend reachable: {}", status);
            }
            AppCmd::BackendDown(error) => {
                tracing::warn!("backend unreachable: {}", error);
                self.toast_overlay
                    .add_toast(adw::Toast::new("Could not reach the support server"));
            }
        }
    }
}
