mod tests {
    use std::{net::SocketAddr, sync::Arc};

    use desk_buddy::{
        AnimationController, Availability, DisplayRenderer, EmotionProfile, HardwareFacade, Rgb,
        SensorSampler,
        http::router,
        mock::{MockPanel, MockSensor, MockStrip},
    };
    use serde_json::{Value, json};
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::{TcpListener, TcpStream},
    };

    struct Server {
        addr: SocketAddr,
        strip: MockStrip,
        panel: MockPanel,
    }

    async fn start() -> Server {
        let strip = MockStrip::new(16);
        let panel = MockPanel::new();
        let sensors = Arc::new(SensorSampler::new(Box::new(MockSensor::failing())));
        let display = Arc::new(DisplayRenderer::new(
            Box::new(panel.clone()),
            sensors.subscribe(),
        ));
        let leds =
            AnimationController::new(Box::new(strip.clone()), EmotionProfile::standard(), 78);
        let availability = Availability {
            led: false,
            oled: false,
            dht: true,
        };
        let facade = HardwareFacade::from_parts(leds, display, sensors, availability);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(Arc::new(facade));
        tokio::spawn(async move { axum::serve(listener, app).await });
        Server { addr, strip, panel }
    }

    /// Send one request and return the status code and the JSON body
    async fn call(server: &Server, method: &str, path: &str, body: &str) -> (u16, Value) {
        let mut stream = TcpStream::connect(server.addr).await.unwrap();
        let request = format!(
            "{method} {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
             Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut raw = Vec::new();
        stream.read_to_end(&mut raw).await.unwrap();
        let text = String::from_utf8(raw).unwrap();
        let (head, payload) = text.split_once("\r\n\r\n").unwrap();
        let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
        (status, serde_json::from_str(payload).unwrap_or(Value::Null))
    }

    async fn get(server: &Server, path: &str) -> (u16, Value) {
        call(server, "GET", path, "").await
    }

    async fn post(server: &Server, path: &str, body: Value) -> (u16, Value) {
        call(server, "POST", path, &body.to_string()).await
    }

    #[tokio::test]
    async fn test_index_and_health() {
        let server = start().await;

        let (status, banner) = get(&server, "/").await;
        assert_eq!(status, 200);
        assert_eq!(banner["status"], "success");
        assert_eq!(banner["routes"].as_array().map(Vec::len), Some(13));
        assert_eq!(banner["hardware"]["sensors"], true);

        let (status, health) = get(&server, "/api/health").await;
        assert_eq!(status, 200);
        assert_eq!(health["status"], "success");
        assert_eq!(health["device"], "Raspberry Pi");
        assert_eq!(
            health["hardware"],
            json!({"led": false, "oled": false, "sensors": true})
        );
    }

    #[tokio::test]
    async fn test_led_routes() {
        let server = start().await;

        let (status, reply) = post(&server, "/api/led/on", json!({})).await;
        assert_eq!(status, 200);
        assert_eq!(
            reply,
            json!({"status": "success", "message": "LED turned on successfully"})
        );

        let (status, reply) = post(&server, "/api/led/color", json!({"r": 1, "g": 2, "b": 3})).await;
        assert_eq!(status, 200);
        assert_eq!(reply["color"], json!([1, 2, 3]));
        assert!(server.strip.cells().iter().all(|&cell| cell == Rgb::new(1, 2, 3)));

        let (status, reply) = post(&server, "/api/led/off", json!({})).await;
        assert_eq!(status, 200);
        assert_eq!(reply["message"], "LED turned off successfully");
        assert!(server.strip.cells().iter().all(|&cell| cell == Rgb::default()));
    }

    #[tokio::test]
    async fn test_brightness_route() {
        let server = start().await;

        let (status, reply) = post(&server, "/api/led/brightness", json!({"brightness": 150})).await;
        assert_eq!(status, 200);
        assert_eq!(reply["brightness"], 100);

        let (status, reply) = post(&server, "/api/led/brightness", json!({"brightness": "abc"})).await;
        assert_eq!(status, 400);
        assert_eq!(reply["status"], "error");
        assert!(reply.get("kind").is_none());

        let (status, reply) = call(&server, "POST", "/api/led/brightness", "not json").await;
        assert_eq!(status, 400);
        assert_eq!(reply["message"], "brightness parameter missing");
    }

    #[tokio::test]
    async fn test_emotion_route() {
        let server = start().await;

        let (status, reply) = post(&server, "/api/led/emotion", json!({"emotion": "ZZZ"})).await;
        assert_eq!(status, 200);
        assert_eq!(reply["emotion"], "ZZZ");
        assert_eq!(reply["resolved"], "neutral");
        assert_eq!(reply["color"], json!([180, 180, 180]));

        let (status, reply) = post(&server, "/api/led/emotion", json!({"emotion": 5})).await;
        assert_eq!(status, 400);
        assert_eq!(reply["status"], "error");
    }

    #[tokio::test]
    async fn test_animation_route() {
        let server = start().await;

        let (status, reply) = post(
            &server,
            "/api/led/animation",
            json!({"animation": "Rainbow"}),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(reply["animation"], "rainbow");
        assert_eq!(reply["color"], json!([255, 255, 255]));

        let (_, status_reply) = get(&server, "/api/system/status").await;
        assert_eq!(status_reply["system_status"]["animation"], "rainbow");

        let (status, reply) = post(&server, "/api/led/animation", json!({"animation": "disco"})).await;
        assert_eq!(status, 400);
        assert!(
            reply["message"]
                .as_str()
                .is_some_and(|message| message.contains("flash_burst"))
        );
    }

    #[tokio::test]
    async fn test_display_routes() {
        let server = start().await;

        let (status, reply) = post(&server, "/api/display/update", json!({"message": "Hi"})).await;
        assert_eq!(status, 200);
        assert_eq!(reply["message"], "Hi");
        assert_eq!(reply["display_message"], "Message displayed successfully");

        let (status, reply) = post(&server, "/api/display/update", json!({})).await;
        assert_eq!(status, 400);
        assert_eq!(reply["message"], "message parameter missing");

        let (status, _) = post(&server, "/api/display/clear", json!({})).await;
        assert_eq!(status, 200);
        assert!(
            server
                .panel
                .last_frame()
                .is_some_and(|frame| frame.bitmap.is_blank())
        );

        server.panel.set_failing(true);
        let (status, reply) = post(&server, "/api/display/clear", json!({})).await;
        assert_eq!(status, 500);
        assert_eq!(reply["status"], "error");
    }

    #[tokio::test]
    async fn test_read_only_routes() {
        let server = start().await;

        let (status, reply) = get(&server, "/api/sensors/read").await;
        assert_eq!(status, 200);
        assert_eq!(reply["sensor_data"]["success"], false);
        assert!(reply["sensor_data"]["error"].is_string());

        let (status, reply) = get(&server, "/api/system/status").await;
        assert_eq!(status, 200);
        let system = &reply["system_status"];
        assert_eq!(system["led_brightness_percent"], 78);
        assert_eq!(system["emotions_available"].as_array().map(Vec::len), Some(14));
        assert!(system["last_sensor_read"].is_string());

        let (status, reply) = get(&server, "/api/emotions/list").await;
        assert_eq!(status, 200);
        assert_eq!(reply["emotions"]["joy"], json!([255, 255, 0]));
        assert_eq!(reply["emotions"]["party"], json!([255, 0, 255]));
    }

    #[tokio::test]
    async fn test_unknown_path_and_wrong_method() {
        let server = start().await;
        assert_eq!(get(&server, "/api/nope").await.0, 404);
        assert_eq!(get(&server, "/api/led/on").await.0, 405);
        assert_eq!(post(&server, "/api/health", json!({})).await.0, 405);
    }
}
