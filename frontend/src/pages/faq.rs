use yew::prelude::*;
use web_sys::MouseEvent;
use yew::{Children, Properties};

/// Accordion rule: clicking the open item closes it, clicking any other item
/// opens that one and closes the rest.
pub fn next_open(open: Option<usize>, clicked: usize) -> Option<usize> {
    if open == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

#[derive(Properties, PartialEq)]
struct FaqItemProps {
    question: String,
    is_open: bool,
    on_toggle: Callback<()>,
    children: Children,
}

#[function_component(FaqItem)]
fn faq_item(props: &FaqItemProps) -> Html {
    let toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_toggle.emit(());
        })
    };

    html! {
        <div class={classes!("faq-item", props.is_open.then(|| "active"))}>
            <button class="faq-question" onclick={toggle} aria-expanded={props.is_open.to_string()}>
                <span class="question-text">{&props.question}</span>
                <span class="toggle-icon">{if props.is_open { "−" } else { "+" }}</span>
            </button>
            <div class="faq-answer">
                { for props.children.iter() }
            </div>
        </div>
    }
}

const QUESTIONS: &[(&str, &str)] = &[
    (
        "Who can apply for the Everyday Card?",
        "Applicants must be at least 21 years old with a minimum annual income of $30,000. Foreigners need a valid employment pass and an income of at least $45,000.",
    ),
    (
        "How do I earn cashback?",
        "Cashback is credited automatically at the end of each statement month. Dining, groceries and public transport earn the boosted rate; everything else earns the base rate.",
    ),
    (
        "Is there a minimum monthly spend?",
        "No. Boosted categories are capped at $100 cashback per month, but there is no minimum spend to earn the base rate.",
    ),
    (
        "When is the annual fee charged?",
        "The first year is free. From the second year the annual fee is charged on your card anniversary and is waived automatically if you spend $10,000 or more in the preceding year.",
    ),
    (
        "How do I report a lost or stolen card?",
        "Lock the card instantly in the mobile app, then call the 24-hour hotline. You are not liable for unauthorised transactions made after the card is reported.",
    ),
    (
        "Can I use the card overseas?",
        "Yes. Overseas transactions in foreign currency carry a 3.25% administrative fee and earn the base cashback rate.",
    ),
];

#[function_component(Faq)]
pub fn faq() -> Html {
    let open = use_state(|| None::<usize>);

    html! {
        <div class="faq-list">
            {
                QUESTIONS.iter().enumerate().map(|(index, (question, answer))| {
                    let on_toggle = {
                        let open = open.clone();
                        Callback::from(move |_: ()| open.set(next_open(*open, index)))
                    };
                    html! {
                        <FaqItem
                            question={question.to_string()}
                            is_open={*open == Some(index)}
                            on_toggle={on_toggle}
                        >
                            <p>{*answer}</p>
                        </FaqItem>
                    }
                }).collect::<Html>()
            }
            <style>
                {r#"
                .faq-item {
                    background: #ffffff;
                    border: 1px solid #e3e6ea;
                    border-radius: 12px;
                    margin-bottom: 1rem;
                    overflow: hidden;
                    transition: all 0.3s ease;
                }

                .faq-item:hover {
                    border-color: #c9d3e0;
                }

                .faq-question {
                    width: 100%;
                    padding: 1.25rem 1.5rem;
                    background: none;
                    border: none;
                    color: #1a1a1a;
                    font-size: 1.05rem;
                    font-weight: 600;
                    text-align: left;
                    cursor: pointer;
                    display: flex;
                    justify-content: space-between;
                    align-items: center;
                }

                .toggle-icon {
                    font-size: 1.5rem;
                    color: #d0021b;
                    transition: transform 0.3s ease;
                }

                .faq-item.active .toggle-icon {
                    transform: rotate(180deg);
                }

                .faq-answer {
                    max-height: 0;
                    overflow: hidden;
                    transition: max-height 0.4s ease;
                    padding: 0 1.5rem;
                }

                .faq-item.active .faq-answer {
                    max-height: 600px;
                    padding: 0 1.5rem 1.25rem;
                }

                .faq-answer p {
                    color: #4a4a4a;
                    line-height: 1.6;
                    margin: 0;
                }
                "#}
            </style>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_one_item_closes_the_other() {
        let open = next_open(None, 1);
        assert_eq!(open, Some(1));
        assert_eq!(next_open(open, 3), Some(3));
    }

    #[test]
    fn clicking_open_item_closes_it() {
        assert_eq!(next_open(Some(2), 2), None);
    }
}
