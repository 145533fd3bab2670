use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

use caregate_core::{Email, NotificationGateway, OtpCode};

pub struct PostmarkNotificationGateway {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkNotificationGateway {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait::async_trait]
impl NotificationGateway for PostmarkNotificationGateway {
    #[tracing::instrument(name = "Sending two-factor code email", skip_all)]
    async fn send_two_factor_code(&self, recipient: &Email, code: &OtpCode) -> Result<(), String> {
        let base = Url::parse(&self.base_url).map_err(|e| e.to_string())?;
        let url = base.join("/email").map_err(|e| e.to_string())?;

        let content = format!(
            "Your verification code is {}. It expires in a few minutes.",
            code.as_str()
        );
        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject: EMAIL_SUBJECT,
            html_body: &content,
            text_body: &content,
            message_stream: MESSAGE_STREAM,
        };

        let request = self
            .http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body);

        request
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

const EMAIL_SUBJECT: &str = "Your verification code";
const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;
    use wiremock::matchers::{header, header_exists, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    fn email() -> Email {
        let raw: String = SafeEmail().fake();
        Email::try_from(Secret::from(raw)).unwrap()
    }

    fn gateway(base_url: String) -> PostmarkNotificationGateway {
        PostmarkNotificationGateway::new(
            base_url,
            email(),
            Secret::from("server_token".to_owned()),
            Client::new(),
        )
    }

    struct SendEmailBodyMatcher;

    impl wiremock::Match for SendEmailBodyMatcher {
        fn matches(&self, request: &Request) -> bool {
            let body: Result<serde_json::Value, _> = serde_json::from_slice(&request.body);
            match body {
                Ok(body) => {
                    body.get("From").is_some()
                        && body.get("To").is_some()
                        && body.get("Subject").is_some()
                        && body.get("HtmlBody").is_some()
                        && body.get("TextBody").is_some()
                }
                Err(_) => false,
            }
        }
    }

    #[tokio::test]
    async fn test_send_delivers_expected_request() {
        let mock_server = MockServer::start().await;
        let gateway = gateway(mock_server.uri());

        Mock::given(header_exists(POSTMARK_AUTH_HEADER))
            .and(header("Content-Type", "application/json"))
            .and(path("/email"))
            .and(method("POST"))
            .and(SendEmailBodyMatcher)
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = gateway
            .send_two_factor_code(&email(), &OtpCode::new())
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_send_fails_on_server_error() {
        let mock_server = MockServer::start().await;
        let gateway = gateway(mock_server.uri());

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = gateway
            .send_two_factor_code(&email(), &OtpCode::new())
            .await;
        assert!(result.is_err());
    }
}
