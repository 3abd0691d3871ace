/// Inbound chat message as delivered by the gateway.
///
/// Gateway-specific fields stay in the adapter; the core only reads the
/// sender (for the reply) and the body (for dispatch). An absent body means
/// the message carries no text (media, reactions) and is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    pub sender: String,
    pub body: Option<String>,
}
