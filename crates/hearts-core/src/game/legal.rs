use crate::model::card::Card;
use crate::model::hand::Hand;

/// Cards `hand` may play given the cards already on the table this trick.
///
/// Rules apply in priority order:
/// 1. Holding the two of clubs forces it.
/// 2. When following, the lead suit must be followed if possible. A void
///    seat may not shed points on the first trick unless it holds nothing
///    else; after that anything goes.
/// 3. When leading, hearts are off limits until broken unless the hand is
///    all hearts.
///
/// The result is sorted and never empty for a non-empty hand.
pub fn legal_moves(
    hand: &Hand,
    trick_so_far: &[Card],
    hearts_broken: bool,
    first_trick: bool,
) -> Vec<Card> {
    if hand.contains(Card::TWO_OF_CLUBS) {
        return vec![Card::TWO_OF_CLUBS];
    }

    match trick_so_far.first() {
        Some(lead) => {
            let following: Vec<Card> = hand.cards_of_suit(lead.suit).collect();
            if !following.is_empty() {
                return following;
            }
            if first_trick {
                return non_empty_or_all(hand, |card| card.penalty_value() == 0);
            }
            hand.cards()
        }
        None if hearts_broken => hand.cards(),
        None => non_empty_or_all(hand, |card| !card.suit.is_heart()),
    }
}

fn non_empty_or_all<F>(hand: &Hand, keep: F) -> Vec<Card>
where
    F: Fn(&Card) -> bool,
{
    let filtered: Vec<Card> = hand.iter().filter(|card| keep(card)).collect();
    if filtered.is_empty() {
        hand.cards()
    } else {
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::legal_moves;
    use crate::model::card::Card;
    use crate::model::hand::Hand;
    use crate::model::suit::Suit;

    fn c(text: &str) -> Card {
        text.parse().expect("valid card literal")
    }

    fn hand(cards: &[&str]) -> Hand {
        cards.iter().map(|text| c(text)).collect()
    }

    #[test]
    fn two_of_clubs_is_forced_whatever_else_is_held() {
        let holding = hand(&["2C", "AS", "QS", "5H", "KD"]);
        assert_eq!(legal_moves(&holding, &[], false, true), vec![Card::TWO_OF_CLUBS]);
        assert_eq!(legal_moves(&holding, &[], true, false), vec![Card::TWO_OF_CLUBS]);
        assert_eq!(
            legal_moves(&holding, &[c("3D")], true, false),
            vec![Card::TWO_OF_CLUBS]
        );
    }

    #[test]
    fn must_follow_lead_suit() {
        let holding = hand(&["3S", "5H", "KD"]);
        assert_eq!(legal_moves(&holding, &[c("2S")], false, false), vec![c("3S")]);
    }

    #[test]
    fn following_returns_every_card_of_the_suit() {
        let holding = hand(&["3S", "JS", "QS", "KD"]);
        assert_eq!(
            legal_moves(&holding, &[c("4S"), c("AH")], true, false),
            vec![c("3S"), c("JS"), c("QS")]
        );
    }

    #[test]
    fn first_trick_void_discard_avoids_points() {
        let holding = hand(&["QS", "3D"]);
        assert_eq!(legal_moves(&holding, &[c("2C")], false, true), vec![c("3D")]);
    }

    #[test]
    fn first_trick_void_with_only_points_falls_back_to_whole_hand() {
        let holding = hand(&["QS", "2H"]);
        assert_eq!(
            legal_moves(&holding, &[c("2C")], false, true),
            vec![c("QS"), c("2H")]
        );
    }

    #[test]
    fn later_void_discard_is_unrestricted() {
        let holding = hand(&["QS", "2H", "3D"]);
        assert_eq!(
            legal_moves(&holding, &[c("4C")], false, false),
            vec![c("3D"), c("QS"), c("2H")]
        );
    }

    #[test]
    fn cannot_lead_hearts_before_broken() {
        let holding = hand(&["4H", "9H", "6D", "JS"]);
        let moves = legal_moves(&holding, &[], false, false);
        assert_eq!(moves, vec![c("6D"), c("JS")]);
        assert!(moves.iter().all(|card| card.suit != Suit::Hearts));
    }

    #[test]
    fn all_hearts_hand_may_lead_hearts() {
        let holding = hand(&["4H", "9H"]);
        assert_eq!(legal_moves(&holding, &[], false, false), vec![c("4H"), c("9H")]);
    }

    #[test]
    fn broken_hearts_open_every_lead() {
        let holding = hand(&["4H", "6D"]);
        assert_eq!(legal_moves(&holding, &[], true, false), vec![c("6D"), c("4H")]);
    }

    #[test]
    fn queen_of_spades_may_be_led_before_hearts_break() {
        let holding = hand(&["QS", "3H"]);
        assert_eq!(legal_moves(&holding, &[], false, false), vec![c("QS")]);
    }
}
