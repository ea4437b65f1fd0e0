/// A small storefront page.
pub const SHOP: &str = r#"<html>
    <body>
        <nav>
            <a class="x" href="/home">Home</a>
            <a class="x y" href="/sale">say HELLO now</a>
            <a class="y" href="/bye">goodbye</a>
        </nav>
        <ul id="basket">
            <li class="item">  Foo  </li>
            <li class="item fruit">a GREEN apple</li>
            <li class="item">blue sky</li>
        </ul>
        <section id="products">
            <article class="product" data-sku="p1">
                <h2>Lamp</h2>
                <span class="price">Total: 40 EUR</span>
                <img src="lamp.png"/>
            </article>
            <article class="product" data-sku="p2">
                <h2>Chair</h2>
                <span class="price">Total: 95 EUR</span>
            </article>
        </section>
    </body>
</html>"#;
