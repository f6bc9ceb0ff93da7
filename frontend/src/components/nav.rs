use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;

const NAV_CSS: &str = r#"
nav {
    position: fixed;
    top: 0;
    width: 100%;
    display: flex;
    justify-content: space-between;
    align-items: center;
    padding: 1rem 2rem;
    background: rgba(10, 10, 10, 0.9);
    z-index: 100;
}
nav ul {
    display: flex;
    gap: 1.5rem;
    list-style: none;
    margin: 0;
}
.menu-toggle {
    display: none;
    background: none;
    border: none;
    cursor: pointer;
}
.menu-toggle span {
    display: block;
    width: 24px;
    height: 2px;
    margin: 5px 0;
    background: #d4af37;
}
@media (max-width: 768px) {
    .menu-toggle { display: block; }
    nav ul {
        display: none;
        position: absolute;
        top: 100%;
        left: 0;
        right: 0;
        flex-direction: column;
        background: #0a0a0a;
        padding: 1rem 2rem;
    }
    nav ul.open { display: flex; }
}
"#;

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);

    let toggle = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };
    // Any link click closes the mobile menu.
    let close = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    html! {
        <>
            <style>{ NAV_CSS }</style>
            <nav>
                <Link<Route> to={Route::Home} classes="logo">{"TaurusBet"}</Link<Route>>
                <button
                    type="button"
                    class={classes!("menu-toggle", (*menu_open).then_some("active"))}
                    aria-label="Menu"
                    aria-expanded={menu_open.to_string()}
                    onclick={toggle}
                >
                    <span></span><span></span><span></span>
                </button>
                <ul class={classes!((*menu_open).then_some("open"))} onclick={close}>
                    <li><Link<Route> to={Route::Home}>{"Accueil"}</Link<Route>></li>
                    <li><a href="#offres">{"Offres"}</a></li>
                    <li><a href="#tickets">{"Tickets"}</a></li>
                    <li><Link<Route> to={Route::Vip}>{"VIP"}</Link<Route>></li>
                </ul>
            </nav>
        </>
    }
}
