//! Staff notification email for a new registrant.

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use shared::links::{mailto_link, whatsapp_link};

use crate::models::Registrant;
use crate::services::notification::NotificationMessage;

/// Bogotá is UTC-5 all year round.
const BOGOTA_UTC_OFFSET_SECS: i32 = -5 * 3600;

/// Formats a timestamp the way `es-CO` renders local date-times in Bogotá,
/// e.g. `14/3/2026, 4:05:09 p. m.`.
pub fn format_bogota_time(at: DateTime<Utc>) -> String {
    let offset = FixedOffset::east_opt(BOGOTA_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
    let local = at.with_timezone(&offset);
    let meridiem = if local.hour() < 12 { "a. m." } else { "p. m." };
    format!("{} {}", local.format("%-d/%-m/%Y, %-I:%M:%S"), meridiem)
}

fn greeting(name: &str) -> String {
    format!("Hola {}! Gracias por registrarte en Minca Mágica", name)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Builds the notification sent to staff after a registrant has been stored.
pub fn build_registration_notification(
    registrant: &Registrant,
    recipients: &[String],
) -> NotificationMessage {
    let subject = format!(
        "🎉 Nuevo registro - {} {} - {}",
        registrant.name, registrant.last_name, registrant.travel_date
    );
    let registered_at = format_bogota_time(registrant.created_at);
    let chat_url = whatsapp_link(&registrant.phone, None);
    let greeting_url = whatsapp_link(&registrant.phone, Some(&greeting(&registrant.name)));

    let body_text = format!(
        r#"¡NUEVO REGISTRO! Minca Mágica - Luisito el Viajero

Fecha viaje: {travel_date}
Nombre: {name} {last_name}
WhatsApp: {phone} ({chat_url})
Email: {email}
Tratamiento de datos: {consent}
Registro: {registered_at}

Contacta al viajero por WhatsApp:
{greeting_url}

Registro ID: #{id}"#,
        travel_date = registrant.travel_date,
        name = registrant.name,
        last_name = registrant.last_name,
        phone = registrant.phone,
        chat_url = chat_url,
        email = registrant.email,
        consent = if registrant.consent { "aceptado" } else { "no aceptado" },
        registered_at = registered_at,
        greeting_url = greeting_url,
        id = registrant.id,
    );

    let body_html = format!(
        r#"<div style="font-family: 'Inter', Arial, sans-serif; max-width: 600px; margin: 0 auto; background: #f8fafc; padding: 40px 20px;">
  <div style="background: linear-gradient(135deg, #064e3b 0%, #065f46 100%); padding: 30px; border-radius: 24px 24px 0 0; text-align: center;">
    <h1 style="color: #34d399; margin: 0; font-size: 28px; font-weight: 900;">¡NUEVO REGISTRO!</h1>
    <p style="color: white; margin: 10px 0 0; font-size: 14px;">Minca Mágica - Luisito el Viajero</p>
    <div style="margin-top: 15px; display: inline-block; background: #34d399; color: #064e3b; padding: 10px 20px; border-radius: 50px; font-weight: 900;">📅 {travel_date}</div>
  </div>
  <div style="background: white; padding: 30px; border-radius: 0 0 24px 24px;">
    <h2 style="color: #0f172a; margin: 0 0 20px; font-size: 20px;">Datos del viajero:</h2>
    <table style="width: 100%; border-collapse: collapse;">
      <tr><td style="padding: 12px 0; color: #065f46; font-weight: 700;">📅 Fecha Viaje</td><td style="padding: 12px 0; font-weight: 900;">{travel_date}</td></tr>
      <tr><td style="padding: 12px 0; color: #64748b;">Nombre</td><td style="padding: 12px 0; font-weight: 600;">{name} {last_name}</td></tr>
      <tr><td style="padding: 12px 0; color: #64748b;">WhatsApp</td><td style="padding: 12px 0;"><a href="{chat_url}" style="color: #10b981;">{phone}</a></td></tr>
      <tr><td style="padding: 12px 0; color: #64748b;">Email</td><td style="padding: 12px 0;"><a href="{mailto}" style="color: #10b981;">{email}</a></td></tr>
      <tr><td style="padding: 12px 0; color: #64748b;">Registro</td><td style="padding: 12px 0; font-weight: 600;">{registered_at}</td></tr>
    </table>
    <div style="margin-top: 30px; padding: 20px; background: #ecfdf5; border-radius: 16px; text-align: center;">
      <p style="margin: 0; color: #065f46; font-weight: 600;">💬 Contacta al viajero por WhatsApp</p>
      <a href="{greeting_url}" style="display: inline-block; margin-top: 15px; padding: 14px 28px; background: #10b981; color: white; text-decoration: none; border-radius: 12px; font-weight: 700;">Enviar mensaje</a>
    </div>
  </div>
  <p style="text-align: center; margin-top: 20px; color: #94a3b8; font-size: 12px;">Registro ID: #{id} • Luisito el Viajero</p>
</div>"#,
        travel_date = escape_html(&registrant.travel_date),
        name = escape_html(&registrant.name),
        last_name = escape_html(&registrant.last_name),
        chat_url = escape_html(&chat_url),
        phone = escape_html(&registrant.phone),
        mailto = escape_html(&mailto_link(&registrant.email)),
        email = escape_html(&registrant.email),
        registered_at = registered_at,
        greeting_url = escape_html(&greeting_url),
        id = registrant.id,
    );

    NotificationMessage {
        to: recipients.to_vec(),
        subject,
        body_text,
        body_html: Some(body_html),
    }
}
