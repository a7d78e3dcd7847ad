//! Locations, venues and contacts.

use crate::params::Params;
use crate::transport::Request;
use crate::types::Message;
use crate::{Bot, InvocationError};

use super::{SharedMarkup, Sendable, add_delivery, impl_delivery_setters, impl_send, marshal_markup};

/// `sendLocation`. A non-zero `live_period` (60–86400 s) makes it a live location.
#[derive(Clone)]
pub struct SendLocation {
    bot: Bot,
    pub chat_id:              i64,
    pub latitude:             f64,
    pub longitude:            f64,
    pub live_period:          i32,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl SendLocation {
    pub fn live_period(mut self, seconds: i32) -> Self {
        self.live_period = seconds; self
    }
}

impl Sendable for SendLocation {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("latitude", self.latitude)
            .add("longitude", self.longitude)
            .add("live_period", self.live_period);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        Ok(Request::new("sendLocation", p))
    }
}

/// `sendVenue`.
#[derive(Clone)]
pub struct SendVenue {
    bot: Bot,
    pub chat_id:              i64,
    pub latitude:             f64,
    pub longitude:            f64,
    pub title:                String,
    pub address:              String,
    pub foursquare_id:        String,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl Sendable for SendVenue {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("latitude", self.latitude)
            .add("longitude", self.longitude)
            .add("title", &self.title)
            .add("address", &self.address)
            .add("foursquare_id", &self.foursquare_id);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        Ok(Request::new("sendVenue", p))
    }
}

/// `sendContact`.
#[derive(Clone)]
pub struct SendContact {
    bot: Bot,
    pub chat_id:              i64,
    pub phone_number:         String,
    pub first_name:           String,
    pub last_name:            String,
    pub disable_notification: bool,
    pub reply_to_message_id:  i32,
    pub reply_markup:         Option<SharedMarkup>,
}

impl Sendable for SendContact {
    type Return = Message;

    fn build(&self) -> Result<Request, InvocationError> {
        let markup = marshal_markup(self.reply_markup.as_ref())?;
        let mut p = Params::new();
        p.add("chat_id", self.chat_id)
            .add("phone_number", &self.phone_number)
            .add("first_name", &self.first_name)
            .add("last_name", &self.last_name);
        add_delivery(&mut p, self.disable_notification, self.reply_to_message_id, &markup);
        Ok(Request::new("sendContact", p))
    }
}

impl_send!(SendLocation, SendVenue, SendContact);
impl_delivery_setters!(SendLocation, SendVenue, SendContact);

impl Bot {
    pub fn send_location(&self, chat_id: i64, latitude: f64, longitude: f64) -> SendLocation {
        SendLocation {
            bot:                  self.clone(),
            chat_id,
            latitude,
            longitude,
            live_period:          0,
            disable_notification: false,
            reply_to_message_id:  0,
            reply_markup:         None,
        }
    }

    pub fn send_venue(
        &self,
        chat_id:   i64,
        latitude:  f64,
        longitude: f64,
        title:     impl Into<String>,
        address:   impl Into<String>,
    ) -> SendVenue {
        SendVenue {
            bot:                  self.clone(),
            chat_id,
            latitude,
            longitude,
            title:                title.into(),
            address:              address.into(),
            foursquare_id:        String::new(),
            disable_notification: false,
            reply_to_message_id:  0,
            reply_markup:         None,
        }
    }

    pub fn send_contact(
        &self,
        chat_id:      i64,
        phone_number: impl Into<String>,
        first_name:   impl Into<String>,
    ) -> SendContact {
        SendContact {
            bot:                  self.clone(),
            chat_id,
            phone_number:         phone_number.into(),
            first_name:           first_name.into(),
            last_name:            String::new(),
            disable_notification: false,
            reply_to_message_id:  0,
            reply_markup:         None,
        }
    }
}
