use super::*;

const CARD_PAGE: &str = r#"
<html><body>
  <a class="card" href="/game/the_witcher_3_wild_hunt">
    <img src="/covers/w3.jpg">
    <span>The Witcher 3: Wild Hunt</span>
  </a>
  <a class="card" href="https://gog-games.test/game/witchaven">
    <span>Witchaven</span>
  </a>
  <a class="card" href="/game/no_title"><img src="/covers/x.jpg"></a>
</body></html>
"#;

#[test]
fn parse_reads_card_layout() {
    let cards = parse_game_cards(CARD_PAGE);
    assert_eq!(cards.len(), 2);
    assert_eq!(
        cards[0],
        (
            "/game/the_witcher_3_wild_hunt".to_string(),
            "The Witcher 3: Wild Hunt".to_string()
        )
    );
    assert_eq!(cards[1].1, "Witchaven");
}

#[test]
fn parse_falls_back_to_game_anchors() {
    let html = r#"
      <div class="results">
        <a href="/game/doom_1993"><span>DOOM (1993)</span></a>
        <a href="/blog/news"><span>Not a game</span></a>
      </div>
    "#;
    let cards = parse_game_cards(html);
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].0, "/game/doom_1993");
    assert_eq!(cards[0].1, "DOOM (1993)");
}

#[test]
fn parse_empty_page_yields_nothing() {
    assert!(parse_game_cards("<html></html>").is_empty());
}

#[test]
fn urlencode_escapes_query_text() {
    assert_eq!(urlencode("The Witcher 3"), "The%20Witcher%203");
    assert_eq!(urlencode("50% off"), "50%25%20off");
}
