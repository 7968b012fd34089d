use chrono::Local;
use gtk::prelude::*;
use relm4::prelude::*;

use crate::models::{Message, Role};
use crate::services::format::{escape_for_display, relative_time};

/// One conversation entry, rendered as a chat bubble. Bubbles are static:
/// history is replaced wholesale on every lookup, never edited in place.
pub struct MessageBubble {
    message: Message,
}

#[relm4::factory(pub)]
impl FactoryComponent for MessageBubble {
    type Init = Message;
    type Input = ();
    type Output = ();
    type CommandOutput = ();
    type ParentWidget = gtk::Box;

    view! {
        gtk::Box {
            set_orientation: gtk::Orientation::Vertical,
            set_spacing: 0,
        }
    }

    fn init_model(message: Self::Init, _index: &DynamicIndex, _sender: FactorySender<Self>) -> Self {
        Self { message }
    }

    fn init_widgets(
        &mut self,
        _index: &DynamicIndex,
        root: Self::Root,
        _returned_widget: &<Self::ParentWidget as relm4::factory::FactoryView>::ReturnedWidget,
        _sender: FactorySender<Self>,
    ) -> Self::Widgets {
        let is_user = self.message.role == Role::User;

        let bubble = gtk::Box::builder()
            .orientation(gtk::Orientation::Vertical)
            .spacing(4)
            .build();
        bubble.add_css_class(&format!("message-bubble-{}", self.message.role.as_str()));
        bubble.add_css_class("card");

        // Role label + timestamp in a horizontal header
        let header = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(8)
            .margin_start(8)
            .margin_end(8)
            .margin_top(4)
            .build();

        let (glyph, role_name) = match self.message.role {
            Role::User => ("\u{2709}\u{fe0f}", "You"),
            Role::Assistant => ("\u{1f49d}", "Support Bot"),
        };
        let role_label = gtk::Label::builder()
            .label(format!("{} {}", glyph, role_name))
            .halign(gtk::Align::Start)
            .hexpand(true)
            .build();
        role_label.add_css_class("caption");
        role_label.add_css_class("dim-label");
        header.append(&role_label);

        let time_label = gtk::Label::builder()
            .label(relative_time(self.message.timestamp, Local::now()))
            .halign(gtk::Align::End)
            .build();
        time_label.add_css_class("caption");
        time_label.add_css_class("dim-label");
        time_label.add_css_class("message-timestamp");
        header.append(&time_label);

        bubble.append(&header);

        // Content is server-controlled text; it goes through the markup
        // escape so it cannot inject Pango structure.
        let content = gtk::Label::builder()
            .halign(gtk::Align::Start)
            .wrap(true)
            .wrap_mode(gtk::pango::WrapMode::WordChar)
            .selectable(true)
            .use_markup(true)
            .margin_start(8)
            .margin_end(8)
            .margin_top(4)
            .margin_bottom(8)
            .build();
        content.set_markup(&escape_for_display(&self.message.content));
        bubble.append(&content);

        let message_row = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(8)
            .margin_top(4)
            .margin_bottom(4)
            .margin_start(12)
            .margin_end(12)
            .halign(if is_user {
                gtk::Align::End
            } else {
                gtk::Align::Start
            })
            .build();
        message_row.append(&bubble);

        root.append(&message_row);

        let widgets = view_output!();
        widgets
    }
}
