use crate::behaviors::Behaviors;
use crate::config::PageConfig;
use crate::pages::faq::Faq;
use log::warn;
use yew::prelude::*;

/// Anchor bar entries: section id and the label shown while collapsed.
const ANCHORS: &[(&str, &str)] = &[
    ("about", "About the Everyday Card"),
    ("redeem", "Redeem your cashback"),
    ("fees", "Fees & charges"),
    ("earn", "Ways to earn"),
    ("deals", "Partner deals"),
    ("manage", "Manage your card"),
    ("faq", "Frequently asked questions"),
    ("terms", "Terms & conditions"),
];

#[function_component(CardPage)]
pub fn card_page() -> Html {
    // Bind the scroll-driven behaviours once the markup is in the document.
    use_effect_with_deps(
        move |_| {
            let behaviors = web_sys::window()
                .and_then(|window| window.document())
                .map(|document| PageConfig::from_document(&document))
                .and_then(|config| {
                    Behaviors::install(&config)
                        .map_err(|e| warn!("Card page behaviours disabled: {}", e))
                        .ok()
                });
            move || drop(behaviors)
        },
        (),
    );

    html! {
        <div class="card-page">
            <header class="card-hero">
                <div class="hero-copy">
                    <p class="hero-eyebrow">{"Everyday Card"}</p>
                    <h1>{"Up to 10% cashback on the things you buy every day"}</h1>
                    <p class="hero-sub">
                        {"Dining, groceries and rides earn the boosted rate, with no minimum spend and no annual fee in the first year."}
                    </p>
                    <a href="#apply" class="btn btn-apply">{"Apply now"}</a>
                </div>
                <div class="hero-card" aria-hidden="true">
                    <span class="hero-card-name">{"Everyday Card"}</span>
                </div>
            </header>

            <div id="productStickyCTA" class="product-sticky-cta">
                <span class="sticky-name">{"Everyday Card"}</span>
                <a href="#apply" class="btn btn-sticky">{"Apply now"}</a>
            </div>

            <div id="anchorLinkMobile" class="anchor-link-mobile">
                <div class="anchor-link-wrapper">
                    <div class="anchor-link-header">
                        <span id="anchorLinkCurrent" class="anchor-link-current">
                            <span class="anchor-text-wrapper">{ANCHORS[0].1}</span>
                        </span>
                        <button id="anchorLinkToggle" class="anchor-link-toggle" aria-label="Expand">
                            <span class="chevron"></span>
                        </button>
                    </div>
                    <nav class="anchor-link-options">
                        {
                            ANCHORS.iter().map(|(id, text)| html! {
                                <a class="anchor-link-option" href={format!("#{}", id)} data-section={*id}>
                                    <span class="anchor-link-text">{*text}</span>
                                </a>
                            }).collect::<Html>()
                        }
                    </nav>
                </div>
            </div>

            <main class="card-sections">
                <section id="about" class="card-section">
                    <h2>{"About the Everyday Card"}</h2>
                    <p>{"One card for daily spending: 10% cashback on dining and groceries on weekends, 5% on rides and public transport, and 0.3% on everything else."}</p>
                    <ul class="benefit-list">
                        <li>{"No minimum spend"}</li>
                        <li>{"Cashback credited automatically every month"}</li>
                        <li>{"Contactless and mobile wallet ready"}</li>
                    </ul>
                </section>

                <section id="redeem" class="card-section">
                    <h2>{"Redeem your cashback"}</h2>
                    <p>{"Cashback is credited to your card account at the end of each statement month. There is nothing to convert and no expiry date."}</p>
                </section>

                <section id="fees" class="card-section">
                    <h2>{"Fees & charges"}</h2>
                    <table class="fee-table">
                        <tbody>
                            <tr><td>{"Annual fee"}</td><td>{"Free for the first year, $196.20 thereafter"}</td></tr>
                            <tr><td>{"Interest on purchases"}</td><td>{"27.8% p.a."}</td></tr>
                            <tr><td>{"Late payment fee"}</td><td>{"$100"}</td></tr>
                            <tr><td>{"Overseas transactions"}</td><td>{"3.25% of the converted amount"}</td></tr>
                        </tbody>
                    </table>
                </section>

                <section id="earn" class="card-section">
                    <h2>{"Ways to earn"}</h2>
                    <div class="earn-grid">
                        <div class="earn-tile"><strong>{"10%"}</strong><span>{"Weekend dining & groceries"}</span></div>
                        <div class="earn-tile"><strong>{"5%"}</strong><span>{"Rides & public transport"}</span></div>
                        <div class="earn-tile"><strong>{"0.3%"}</strong><span>{"Everything else"}</span></div>
                    </div>
                </section>

                <section id="deals" class="card-section">
                    <h2>{"Partner deals"}</h2>
                    <p>{"Enjoy year-round savings with dining, travel and shopping partners. New deals are added every month."}</p>
                </section>

                <section id="manage" class="card-section">
                    <h2>{"Manage your card"}</h2>
                    <p>{"Lock and unlock your card, set spending limits and view transactions instantly in the mobile app."}</p>
                </section>

                <section id="faq" class="card-section">
                    <h2>{"Frequently asked questions"}</h2>
                    <Faq />
                </section>

                <section id="terms" class="card-section terms">
                    <h2>{"Terms & conditions"}</h2>
                    <p>{"Cashback is capped at $100 per statement month. Approval is subject to the bank's credit assessment. Full terms govern the use of the card and may change with notice."}</p>
                </section>

                <section id="apply" class="card-section apply">
                    <h2>{"Ready to apply?"}</h2>
                    <a href="#apply" class="btn">{"Start application"}</a>
                </section>
            </main>

            <style>
                {r#"
                .card-page {
                    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                    color: #1a1a1a;
                    background: #f5f6f8;
                }

                .card-hero {
                    display: flex;
                    flex-wrap: wrap;
                    align-items: center;
                    gap: 2rem;
                    max-width: 1100px;
                    margin: 0 auto;
                    padding: 3rem 1.25rem;
                }

                .hero-copy {
                    flex: 1 1 320px;
                }

                .hero-eyebrow {
                    color: #d0021b;
                    font-weight: 600;
                    letter-spacing: 0.05em;
                    text-transform: uppercase;
                }

                .hero-card {
                    flex: 0 1 360px;
                    aspect-ratio: 1.586;
                    border-radius: 16px;
                    background: linear-gradient(135deg, #d0021b, #7a0010);
                    display: flex;
                    align-items: flex-end;
                    padding: 1.5rem;
                }

                .hero-card-name {
                    color: #ffffff;
                    font-weight: 600;
                }

                .btn {
                    display: inline-block;
                    background: #d0021b;
                    color: #ffffff;
                    padding: 0.85rem 1.75rem;
                    border-radius: 999px;
                    font-weight: 600;
                    text-decoration: none;
                }

                .product-sticky-cta {
                    position: fixed;
                    top: 0;
                    left: 0;
                    right: 0;
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                    padding: 0.75rem 1.25rem;
                    background: #ffffff;
                    box-shadow: 0 2px 8px rgba(0, 0, 0, 0.08);
                    transform: translateY(-100%);
                    transition: transform 0.3s ease;
                    z-index: 20;
                }

                .product-sticky-cta.visible {
                    transform: translateY(0);
                }

                .btn-sticky {
                    padding: 0.5rem 1.25rem;
                }

                .anchor-link-mobile {
                    position: relative;
                    background: #ffffff;
                    border-bottom: 1px solid #e3e6ea;
                    z-index: 15;
                }

                .anchor-link-mobile.sticky-active {
                    position: fixed;
                    left: 0;
                    right: 0;
                }

                .anchor-link-wrapper {
                    padding: 16px 20px 17px;
                    cursor: pointer;
                }

                .anchor-link-header {
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                }

                .anchor-link-current {
                    position: relative;
                    overflow: hidden;
                    height: 23px;
                    font-weight: 600;
                }

                .anchor-text-wrapper {
                    display: inline-block;
                    transition: transform 0.2s ease, opacity 0.2s ease;
                }

                .anchor-text-wrapper.slide-out-up {
                    transform: translateY(-100%);
                    opacity: 0;
                }

                .anchor-text-wrapper.slide-out-down {
                    transform: translateY(100%);
                    opacity: 0;
                }

                .anchor-text-wrapper.slide-in-from-bottom {
                    animation: slideInFromBottom 0.25s ease forwards;
                }

                .anchor-text-wrapper.slide-in-from-top {
                    animation: slideInFromTop 0.25s ease forwards;
                }

                @keyframes slideInFromBottom {
                    from { transform: translateY(100%); opacity: 0; }
                    to { transform: translateY(0); opacity: 1; }
                }

                @keyframes slideInFromTop {
                    from { transform: translateY(-100%); opacity: 0; }
                    to { transform: translateY(0); opacity: 1; }
                }

                .anchor-link-toggle {
                    background: none;
                    border: none;
                    padding: 4px;
                    cursor: pointer;
                }

                .chevron {
                    display: block;
                    width: 10px;
                    height: 10px;
                    border-right: 2px solid #1a1a1a;
                    border-bottom: 2px solid #1a1a1a;
                    transform: rotate(45deg);
                    transition: transform 0.3s ease;
                }

                .anchor-link-mobile.expanded .chevron {
                    transform: rotate(-135deg);
                }

                .anchor-link-options {
                    display: flex;
                    flex-direction: column;
                    max-height: 0;
                    overflow: hidden;
                    transition: max-height 0.3s ease;
                }

                .anchor-link-mobile.expanded .anchor-link-options {
                    max-height: 480px;
                }

                .anchor-link-option {
                    padding: 0.6rem 0;
                    color: #4a4a4a;
                    text-decoration: none;
                    transition: opacity 0.2s ease;
                }

                .anchor-link-option.active {
                    color: #d0021b;
                    font-weight: 600;
                }

                .card-sections {
                    max-width: 800px;
                    margin: 0 auto;
                    padding: 1rem 1.25rem 4rem;
                }

                .card-section {
                    padding: 3rem 0;
                    border-bottom: 1px solid #e3e6ea;
                    min-height: 60vh;
                }

                .card-section h2 {
                    font-size: 1.75rem;
                    margin-bottom: 1rem;
                }

                .card-section p {
                    line-height: 1.6;
                    color: #4a4a4a;
                }

                .fee-table {
                    width: 100%;
                    border-collapse: collapse;
                }

                .fee-table td {
                    padding: 0.75rem 0;
                    border-bottom: 1px solid #e3e6ea;
                }

                .earn-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
                    gap: 1rem;
                }

                .earn-tile {
                    background: #ffffff;
                    border-radius: 12px;
                    padding: 1.5rem;
                    display: flex;
                    flex-direction: column;
                    gap: 0.5rem;
                }

                .earn-tile strong {
                    font-size: 2rem;
                    color: #d0021b;
                }

                .card-section.apply {
                    text-align: center;
                    min-height: auto;
                    border-bottom: none;
                }
                "#}
            </style>
        </div>
    }
}

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <div class="card-page not-found">
            <h1>{"Page not found"}</h1>
            <a href="/" class="btn">{"Back to the Everyday Card"}</a>
        </div>
    }
}
